use hack_asm::{assemble, translate, AsmError, Tables};
use pretty_assertions::assert_eq;
use std::io::Cursor;

const ADD: &str = "\
// Computes R0 = 2 + 3
@2
D=A
@3
D=D+A
@0
M=D
";

const MAX: &str = "\
// Computes R2 = max(R0, R1)
   @R0
   D=M              // D = first number
   @R1
   D=D-M            // D = first number - second number
   @OUTPUT_FIRST
   D;JGT            // if D>0 goto output_first
   @R1
   D=M              // D = second number
   @OUTPUT_D
   0;JMP            // goto output_d
(OUTPUT_FIRST)
   @R0
   D=M              // D = first number
(OUTPUT_D)
   @R2
   M=D              // M[2] = D (greatest number)
(INFINITE_LOOP)
   @INFINITE_LOOP
   0;JMP            // infinite loop
";

const MAX_HACK: &str = "\
0000000000000000
1111110000010000
0000000000000001
1111010011010000
0000000000001010
1110001100000001
0000000000000001
1111110000010000
0000000000001100
1110101010000111
0000000000000000
1111110000010000
0000000000000010
1110001100001000
0000000000001110
1110101010000111
";

fn tables() -> Tables {
    Tables::builtin().unwrap()
}

#[test]
fn add_program() {
    let p = assemble(ADD, &tables()).unwrap();
    assert_eq!(
        p.to_text(),
        "0000000000000010\n\
         1110110000010000\n\
         0000000000000011\n\
         1110000010010000\n\
         0000000000000000\n\
         1110001100001000\n"
    );
    let lines: Vec<String> = p.lines().collect();
    for (i, l) in lines.iter().enumerate() {
        let prefix = if i % 2 == 0 { "000" } else { "111" };
        assert!(l.starts_with(prefix), "{l}");
    }
}

#[test]
fn max_program_with_labels() {
    let p = assemble(MAX, &tables()).unwrap();
    assert_eq!(p.to_text(), MAX_HACK);
    assert_eq!(p.symbols.get("OUTPUT_FIRST"), Some(10));
    assert_eq!(p.symbols.get("OUTPUT_D"), Some(12));
    assert_eq!(p.symbols.get("INFINITE_LOOP"), Some(14));
}

#[test]
fn every_line_is_sixteen_binary_digits() {
    let p = assemble(MAX, &tables()).unwrap();
    for line in p.lines() {
        assert_eq!(line.len(), 16);
        assert!(line.bytes().all(|b| b == b'0' || b == b'1'));
    }
}

#[test]
fn translation_is_deterministic() {
    let t = tables();
    let a = assemble(MAX, &t).unwrap().to_text();
    let b = assemble(MAX, &t).unwrap().to_text();
    assert_eq!(a, b);
}

#[test]
fn label_resolves_to_following_instruction() {
    let p = assemble("@0\nD=A\n(LOOP)\n@LOOP\n0;JMP\n", &tables()).unwrap();
    let lines: Vec<String> = p.lines().collect();
    assert_eq!(lines[2], "0000000000000010");
}

#[test]
fn forward_and_backward_references_agree() {
    let src = "@END\n0;JMP\nD=A\n(END)\n@END\n0;JMP\n";
    let p = assemble(src, &tables()).unwrap();
    assert_eq!(p.words[0], 3);
    assert_eq!(p.words[3], 3);
}

#[test]
fn variables_allocated_from_sixteen() {
    let src = "@i\nM=1\n@sum\nM=0\n@i\nD=M\n@sum\n";
    let p = assemble(src, &tables()).unwrap();
    let lines: Vec<String> = p.lines().collect();
    assert_eq!(lines[0], "0000000000010000");
    assert_eq!(lines[1], "1110111111001000");
    assert_eq!(lines[2], "0000000000010001");
    assert_eq!(lines[3], "1110101010001000");
    assert_eq!(lines[4], lines[0]);
    assert_eq!(lines[6], lines[2]);
}

#[test]
fn labels_take_precedence_over_variables() {
    // used before its declaration, still a label rather than RAM[16]
    let src = "@LOOP\n0;JMP\n(LOOP)\n@x\n";
    let p = assemble(src, &tables()).unwrap();
    assert_eq!(p.words[0], 2);
    assert_eq!(p.words[2], 16);
}

#[test]
fn predefined_symbols_are_not_variables() {
    let p = assemble("@KBD\n@SCREEN\n@THIS\n@v\n", &tables()).unwrap();
    assert_eq!(p.words, vec![24576, 16384, 3, 16]);
}

#[test]
fn comment_only_source_is_empty() {
    let p = assemble("// nothing\n\n   \n// here\n", &tables()).unwrap();
    assert!(p.is_empty());
    assert_eq!(p.to_text(), "");
}

#[test]
fn translate_writes_complete_output() {
    let mut out = Vec::new();
    let p = translate(Cursor::new(ADD), &mut out, &tables()).unwrap();
    assert_eq!(p.len(), 6);
    assert_eq!(String::from_utf8(out).unwrap(), p.to_text());
}

#[test]
fn translate_writes_nothing_on_failure() {
    let mut out = Vec::new();
    let e = translate(Cursor::new("@1\nD=A\nD=BOGUS\n"), &mut out, &tables()).unwrap_err();
    assert!(matches!(e, AsmError::UnknownMnemonic { line: 3, .. }));
    assert!(out.is_empty());
}

#[test]
fn crlf_sources_assemble_like_lf() {
    let t = tables();
    let crlf = MAX.replace('\n', "\r\n");
    assert_eq!(assemble(&crlf, &t).unwrap().to_text(), MAX_HACK);
}
