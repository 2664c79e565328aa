#[cfg(test)]
use super::detokenizer::Detokenizer;
#[cfg(test)]
use super::program::Program;
#[cfg(test)]
use hex;

/// decode `hex_tokens` and compare the text of every statement, empty ones included
#[cfg(test)]
fn test_statements(hex_tokens: &str, expected: &[&str]) {
    let tokens = hex::decode(hex_tokens).expect("hex error");
    let detok = Detokenizer::new();
    let program = Program::decode(&tokens,&detok,true);
    let actual: Vec<String> = (0..program.statements().len()).map(|i| program.statement_text(i)).collect();
    assert_eq!(actual,expected);
}

mod lines {
    use crate::lang::applesoft::detokenizer::Detokenizer;
    use crate::lang::applesoft::program::Program;
    #[test]
    fn too_short() {
        let detok = Detokenizer::new();
        for hex_tokens in ["","0A08","0A080A00"] {
            let tokens = hex::decode(hex_tokens).expect("hex error");
            let program = Program::decode(&tokens,&detok,true);
            assert_eq!(program.lines().len(),0);
            assert_eq!(program.statements().len(),0);
        }
    }
    #[test]
    fn two_lines() {
        let tokens = hex::decode("07080A00970014081400BA2248454C4C4F22000000").expect("hex error");
        let detok = Detokenizer::new();
        let program = Program::decode(&tokens,&detok,true);
        let numbers: Vec<u16> = program.lines().iter().map(|l| l.number).collect();
        assert_eq!(numbers,vec![10,20]);
        assert_eq!(program.lines()[1].offset,6);
        assert_eq!(program.lines()[1].length,13);
        assert_eq!(program.end_offset(),19);
        assert_eq!(program.load_address(),0x801);
    }
    #[test]
    fn link_must_increase() {
        // second link is lower than the first, so decoding stops there
        let tokens = hex::decode("07080A00970005081400BA41000000").expect("hex error");
        let detok = Detokenizer::new();
        let program = Program::decode(&tokens,&detok,true);
        assert_eq!(program.lines().len(),1);
        assert_eq!(program.end_offset(),6);
    }
    #[test]
    fn unterminated_line() {
        let tokens = hex::decode("09080A00BA41").expect("hex error");
        let detok = Detokenizer::new();
        let program = Program::decode(&tokens,&detok,true);
        assert_eq!(program.lines().len(),1);
        assert_eq!(program.statements()[0].length,2);
        assert_eq!(program.statements()[0].delimiter,0);
        assert_eq!(program.statement_text(0),"PRINT A");
    }
    #[test]
    fn statement_address() {
        let tokens = hex::decode("0C080A00B03130303A800018086400BA224849223AB1000000").expect("hex error");
        let detok = Detokenizer::new();
        let program = Program::decode(&tokens,&detok,true);
        assert_eq!(program.statement_address(0),0x805);
        assert_eq!(program.statement_address(1),0x80a);
        assert_eq!(program.line_statements(1).len(),2);
        assert_eq!(program.statement_bytes(3),&[0xb1]);
    }
}

mod statements {
    #[test]
    fn token_free() {
        super::test_statements("0B080A0048454C4C4F000000",&["HELLO"]);
    }
    #[test]
    fn control_character() {
        super::test_statements("0A080A00BA220722000000",&["PRINT \"^G\""]);
    }
    #[test]
    fn colon_separated() {
        super::test_statements("0C080A00B03130303A800018086400BA224849223AB1000000",
            &["GOSUB 100","END","PRINT \"HI\"","RETURN"]);
    }
    #[test]
    fn if_then() {
        super::test_statements("15080A00AD41CF31C4BA22424947223A58D031001B08140080000000",
            &["IF A > 1 THEN ","PRINT \"BIG\"","X = 1","END"]);
    }
    #[test]
    fn if_goto() {
        super::test_statements("0C080A00AD41AB313030001208640080000000",&["IF A","GOTO 100","END"]);
    }
    #[test]
    fn colon_in_string() {
        super::test_statements("0E080A00BA22413A42223A80000000",&["PRINT \"A:B\"","END"]);
    }
    #[test]
    fn colon_in_comment() {
        super::test_statements("0E080A00BA313AB220413A42000000",&["PRINT 1","REM  A:B"]);
    }
    #[test]
    fn empty_statements() {
        super::test_statements("07080A003A000D08140080000000",&["","","END"]);
    }
    #[test]
    fn aligned_text() {
        let tokens = hex::decode("15080A0041D0313A4242D0323A43434343D033000000").expect("hex error");
        let detok = crate::lang::applesoft::detokenizer::Detokenizer::new();
        let program = crate::lang::applesoft::program::Program::decode(&tokens,&detok,true);
        assert_eq!(program.aligned_text(0,5),"A    = 1");
        assert_eq!(program.aligned_text(2,5),"CCCC = 3");
        // column to the left of the operator leaves the text alone
        assert_eq!(program.aligned_text(2,2),"CCCC = 3");
    }
}

mod token_table {
    use std::collections::HashMap;
    use crate::lang::applesoft::detokenizer::Detokenizer;
    #[test]
    fn standard_keywords() {
        let detok = Detokenizer::new();
        assert_eq!(detok.keyword(0x81),Some("FOR "));
        assert_eq!(detok.keyword(0x97),Some("HOME"));
        assert_eq!(detok.keyword(0xff),None);
    }
    #[test]
    fn custom_map() {
        // unknown tokens still get their leading space but no text
        let detok = Detokenizer::from_map(HashMap::from([(0xba,"PRINT ")]));
        assert_eq!(detok.detokenize(&[0xba,0x41,0x97]),"PRINT A ");
    }
}
