//! Common test utilities and helpers.
//!
//! Synthetic artifacts for every recognized format, built byte by byte so
//! the tests need no sample corpus.

#![allow(dead_code)]

pub mod test_utils;

pub const SCREEN: usize = 32000;

fn words(ws: &[u16]) -> Vec<u8> {
    ws.iter().flat_map(|w| w.to_be_bytes()).collect()
}

/// GEM resource: header, 3 objects, a 2-entry tree index.
pub fn rsc() -> Vec<u8> {
    rsc_with_version(0)
}

/// Same resource with a chosen version word.
pub fn rsc_with_version(version: u16) -> Vec<u8> {
    let object = 36u16;
    let trindex = object + 3 * 24;
    let size = trindex + 2 * 2;
    let mut h = [0u16; 18];
    h[0] = version;
    h[1] = object;
    h[9] = trindex;
    h[10] = 3;
    h[11] = 2;
    h[17] = size;
    let mut d = words(&h);
    d.resize(size as usize, 0);
    d
}

pub fn turboc(tlen: u32, dlen: u32, blen: u32) -> Vec<u8> {
    let mut d = words(&[0x4EFA, 0x001C]);
    for v in [tlen, dlen, blen, 0] {
        d.extend_from_slice(&v.to_be_bytes());
    }
    d.resize(32 + (tlen + dlen + blen) as usize, 0x4E);
    d
}

/// Devpac object: signature, NUL-terminated name, records, optional end record.
pub fn devpac(name: &str, records: &[(u8, &[u8])], end: bool) -> Vec<u8> {
    let mut d = vec![0xFF, 0x65];
    d.extend_from_slice(name.as_bytes());
    d.push(0);
    for (kind, payload) in records {
        d.push(*kind);
        d.extend_from_slice(&(payload.len() as u16).to_be_bytes());
        d.extend_from_slice(payload);
    }
    if end {
        d.extend_from_slice(&[0x13, 0, 0]);
    }
    d
}

/// GEMDOS header plus a zero-filled image of `tlen + dlen` bytes.
pub fn gemdos_image(tlen: u32, dlen: u32, slen: u32) -> Vec<u8> {
    let mut d = words(&[0x601A]);
    for v in [tlen, dlen, 0, slen] {
        d.extend_from_slice(&v.to_be_bytes());
    }
    d.extend_from_slice(&[0u8; 10]);
    d.resize(28 + (tlen + dlen) as usize, 0);
    d
}

/// Executable with a walkable relocation stream: fixups at 2 and 6.
pub fn gemdos_prg() -> Vec<u8> {
    let mut d = gemdos_image(64, 16, 0);
    d.extend_from_slice(&2u32.to_be_bytes());
    d.extend_from_slice(&[4, 0]);
    d
}

/// DRI symbol table where the first `tagged` symbols have the high bit set.
pub fn dri_symbols(count: usize, tagged: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for i in 0..count {
        let mut sym = [0u8; 14];
        sym[..6].copy_from_slice(b"_start");
        let value: u32 = if i < tagged { 0x8000_0000 | (i as u32 * 4) } else { 0x10 };
        sym[8..12].copy_from_slice(&value.to_be_bytes());
        out.extend_from_slice(&sym);
    }
    out
}

/// Linkable object: tagged symbols and an empty relocation stream.
pub fn gemdos_object() -> Vec<u8> {
    let syms = dri_symbols(6, 4);
    let mut d = gemdos_image(48, 0, syms.len() as u32);
    d.extend_from_slice(&syms);
    d.extend_from_slice(&0u32.to_be_bytes());
    d
}

pub fn degas_classic(res: u16) -> Vec<u8> {
    let mut d = vec![0u8; 2 + 32 + SCREEN];
    d[..2].copy_from_slice(&res.to_be_bytes());
    d
}

pub fn degas_elite(res: u16) -> Vec<u8> {
    let mut d = degas_classic(res);
    d.resize(2 + 32 + SCREEN + 32, 0);
    d
}

pub fn neochrome() -> Vec<u8> {
    let mut d = vec![0u8; 128 + SCREEN];
    d[40..42].copy_from_slice(&320u16.to_be_bytes());
    d[42..44].copy_from_slice(&200u16.to_be_bytes());
    d
}

/// Compressed DEGAS Elite whose body is a marker-run encoding of `screen`.
pub fn degas_compressed(res: u16, screen: &[u8]) -> Vec<u8> {
    let mut d = (0x8000 | res).to_be_bytes().to_vec();
    d.extend_from_slice(&[0u8; 32]);
    d.extend_from_slice(&stsift::encode_marker_run(screen));
    d.extend_from_slice(&[0u8; 32]);
    d
}

/// STAD image of 250 runs totalling one screen.
pub fn stad() -> Vec<u8> {
    let mut d = b"pM86".to_vec();
    d.extend_from_slice(&[0xCC, 0x01, 0x55]);
    for _ in 0..125 {
        d.extend_from_slice(&[0xCC, 0x01, 0xFF, 0x00, 0xCC, 0x01, 0x01, 0x00]);
    }
    d.extend_from_slice(&[0xCC, 0x00]);
    d
}

/// Monochrome 16x2 GEM IMG whose body decodes exactly.
pub fn gem_img() -> Vec<u8> {
    let mut d = words(&[1, 8, 1, 2, 85, 85, 16, 2]);
    d.extend_from_slice(&[0x82, 0x02]);
    d
}

/// Header with `defines` definitions, two includes, no braces, no entry point.
pub fn c_header(defines: usize) -> String {
    let mut s = String::from("#include <portab.h>\n#include <osbind.h>\n\n");
    for i in 0..defines {
        s.push_str(&format!("#define WF_{i:02}\t{}\n", i * 2));
    }
    s
}

pub const C_SOURCE: &str = "/* HELLO.C -- greet the user */
#include <stdio.h>
#include <stdlib.h>

static int count;

int main(void)
{
    char *buf = malloc(64);
    if (buf == NULL) {
        return 1;
    }
    printf(\"hello\\n\");
    free(buf);
    return 0;
}
";

pub const MAKEFILE: &str = "CC = gcc
CFLAGS = -O

all: prog

prog: main.o
\t$(CC) -o $@ main.o

clean:
\trm -f *.o
";

pub const ASSEMBLY: &str = "; startup
\tSECTION TEXT
start:\tmove.l\t4(sp),a0
\tlea\tstack,sp
loop:\tbsr\tinit
\tbra\tloop
exit:\tclr.w\t-(sp)
\ttrap\t#1
\tDC.W\t$4E75
\tEND
";

pub const PROSE: &str = "This disk holds the last backup of the project.
Most files were recovered without their names.
";

/// Deterministic pseudo-random bytes.
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

pub const DESKTOP_INF: &str = r"#a000000
#b001000
#c7770007000600070055200505552220770557075055507703111103
#d
#E 18 11
#W 00 00 00 01 26 0C 09 A:\*.*@
#W 00 00 0A 03 14 0B 00 @
#M 00 00 01 FF A DISK A@ @
#M 01 00 01 FF B DISK B@ @
#T 00 03 02 FF   TRASH@ @
#F FF 04   @ *.*@
#D FF 01   @ *.*@
#G 03 FF   *.APP@ @
#P 03 FF   *.TTP@ @
";

pub const BATCH: &str = r"@echo off
rem build the demo
set LIB=C:\LIB
cd \SRC
if exist demo.prg del demo.prg
copy demo.ttp \BIN\demo.ttp
goto done
:done
";

pub const PROJECT: &str = r"; project file for DEMO.PRG
demo.prg
.C [ -Iinclude -DNDEBUG ]
=
pcstart.o
main.c
window.c
gemio.c
draw.c
util.c
demo.rsc
lib\pcstdlib.lib
lib\pcgemlib.lib
";

pub const RESOURCE_DEF: &str = r#"RESOURCE DEMO
TREE MAINMENU MENU
  OBJECT TITLE_FILE, G_TITLE, 0, 0, 6, 1
  OBJECT TITLE_EDIT, G_TITLE, 6, 0, 6, 1
TREE ABOUT DIALOG
  OBJECT ABOUT_BOX, G_BOX, 0, 0, 40, 12
  TEDINFO VERSION, "1.0", 3, 0
  STRING ABOUT_OK, "OK", 16, 10, 8, 1
ALERT QUIT_ALERT, "[2][Quit?][Yes|No]"
"#;

/// Header and source evidence within the margin of each other.
pub const WINDOW_DECLS: &str = "#include <portab.h>
#define MAX_WIN 8 // windows
extern int wind_top(int handle);
extern int wind_count(void);
";

pub const WINDOW_BANNER: &str = "/* WINDOW.H -- window helpers */\n";

pub const GUARDED_HEADER: &str = "#ifndef VDI_H
#define VDI_H
extern int vdi_handle;
int v_opnvwk(int *work_in, int *handle, int *work_out);
int v_clsvwk(int handle);
#endif
";

/// C with goto labels in column zero.
pub const C_WITH_LABELS: &str = "#include <stdio.h>

int main(void)
{
    int tries = 0;
retry:
    tries++;
again:
    if (tries < 3) goto retry;
done:
    printf(\"%d\\n\", tries);
fail:
    return 0;
}
";
