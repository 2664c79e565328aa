#[cfg(test)]
use super::detokenizer::Detokenizer;
#[cfg(test)]
use super::program::{Program,Statement};
#[cfg(test)]
use super::Token;
#[cfg(test)]
use hex;

#[cfg(test)]
fn decode_and<F: Fn(&Program)>(hex_tokens: &str, align_assignments: bool, check: F) {
    let tokens = hex::decode(hex_tokens).expect("hex error");
    let detok = Detokenizer::new();
    let program = Program::decode(&tokens,&detok,align_assignments);
    check(&program);
}

#[cfg(test)]
fn next_statement(vars: Option<Vec<&str>>) -> Statement {
    Statement {
        line: 0,
        offset: 4,
        length: 1,
        delimiter: 1,
        leading: Token::Next,
        is_first: true,
        for_variable: None,
        next_variables: vars.map(|v| v.iter().map(|s| s.to_string()).collect()),
        branch_target: None,
        assign_column: 0,
        conceals_code: false
    }
}

mod loops {
    use crate::lang::applesoft::structure::{pop_loop_variables,same_variable};
    #[test]
    fn for_variable() {
        super::decode_and("0D080A00814142D031C133000000",true,|program| {
            assert!(program.statements()[0].is(super::Token::For));
            assert_eq!(program.statements()[0].for_variable,Some("AB".to_string()));
        });
    }
    #[test]
    fn next_variables() {
        super::decode_and("0A080A00824A2C49000000",true,|program| {
            assert_eq!(program.statements()[0].next_variables,Some(vec!["J".to_string(),"I".to_string()]));
        });
    }
    #[test]
    fn naked_next() {
        super::decode_and("07080A0082000000",true,|program| {
            assert_eq!(program.statements()[0].next_variables,Some(Vec::new()));
        });
    }
    #[test]
    fn variable_names() {
        assert!(same_variable("I","I"));
        assert!(same_variable("AB1","AB2"));
        assert!(!same_variable("A","AB"));
        assert!(!same_variable("AB","AC"));
    }
    #[test]
    fn pop_to_match() {
        let mut stack = vec!["I".to_string(),"J".to_string(),"K".to_string()];
        pop_loop_variables(&mut stack,&super::next_statement(Some(vec!["J"])));
        assert_eq!(stack,vec!["I".to_string()]);
    }
    #[test]
    fn pop_innermost() {
        let mut stack = vec!["I".to_string(),"J".to_string()];
        pop_loop_variables(&mut stack,&super::next_statement(Some(vec![])));
        assert_eq!(stack,vec!["I".to_string()]);
        pop_loop_variables(&mut stack,&super::next_statement(Some(vec![])));
        pop_loop_variables(&mut stack,&super::next_statement(Some(vec![])));
        assert_eq!(stack.len(),0);
    }
    #[test]
    fn pop_unknown_variable() {
        // no match empties the stack
        let mut stack = vec!["I".to_string(),"J".to_string()];
        pop_loop_variables(&mut stack,&super::next_statement(Some(vec!["Q"])));
        assert_eq!(stack.len(),0);
    }
}

mod branches {
    #[test]
    fn goto_and_gosub() {
        super::decode_and("0C080A00B03130303A800018086400BA224849223AB1000000",true,|program| {
            assert_eq!(program.statements()[0].branch_target,Some(100));
            assert!(program.is_gosub_target(100));
            assert!(!program.is_goto_target(100));
            assert!(!program.is_gosub_target(10));
        });
    }
    #[test]
    fn implied_goto() {
        super::decode_and("0C080A00AD41C4313030001208640080000000",true,|program| {
            assert!(program.statements()[1].is_implied_goto());
            assert_eq!(program.statements()[1].branch_target,Some(100));
            assert!(program.is_goto_target(100));
        });
    }
    #[test]
    fn unparsable_target() {
        super::decode_and("0A080A00AB315830000000",true,|program| {
            assert!(program.statements()[0].is(super::Token::Goto));
            assert_eq!(program.statements()[0].branch_target,None);
            assert!(!program.is_goto_target(1));
        });
    }
}

mod comments {
    #[test]
    fn concealed_code() {
        super::decode_and("0A080A00B2A9C160001008140080000000",true,|program| {
            assert!(program.statements()[0].conceals_code);
            assert!(!program.statements()[1].conceals_code);
        });
    }
    #[test]
    fn ordinary_comment() {
        super::decode_and("0D080A00B22048454C4C4F000000",true,|program| {
            assert!(program.statements()[0].is(super::Token::Rem));
            assert!(!program.statements()[0].conceals_code);
            assert!(!program.statements()[0].is_joinable_comment());
        });
    }
    #[test]
    fn joinable() {
        super::decode_and("0E080A00BA313AB220413A42000000",true,|program| {
            assert!(program.statements()[1].is_joinable_comment());
        });
    }
}

mod assignments {
    use crate::lang::applesoft::align::{highest_assign_column,resolve};
    #[test]
    fn let_column() {
        super::decode_and("0A080A00AA41D031000000",false,|program| {
            assert_eq!(program.statements()[0].assign_column,6);
        });
    }
    #[test]
    fn plain_columns() {
        super::decode_and("15080A0041D0313A4242D0323A43434343D033000000",true,|program| {
            let cols: Vec<usize> = program.statements().iter().map(|s| s.assign_column).collect();
            assert_eq!(cols,vec![2,3,5]);
            assert_eq!(highest_assign_column(program,0,false),5);
            assert_eq!(highest_assign_column(program,1,false),5);
        });
    }
    #[test]
    fn plain_columns_not_located() {
        super::decode_and("15080A0041D0313A4242D0323A43434343D033000000",false,|program| {
            assert!(program.statements().iter().all(|s| s.assign_column==0));
        });
    }
    #[test]
    fn comparison_is_not_assignment() {
        // IF A = 1 THEN PRINT A, the condition is a comparison
        super::decode_and("0C080A00AD41D031C4BA41000000",true,|program| {
            assert_eq!(program.statements()[0].assign_column,0);
        });
    }
    #[test]
    fn run_ends_after_if() {
        super::decode_and("12080A00AD41C458D0313A595959D032001E0814005A5A5A5A5AD033000000",true,|program| {
            assert_eq!(highest_assign_column(program,1,false),4);
            assert_eq!(highest_assign_column(program,3,false),6);
        });
    }
    #[test]
    fn run_through_comment() {
        super::decode_and("0C080A0041D0313AB2580016081400424242D032000000",true,|program| {
            assert_eq!(highest_assign_column(program,0,false),4);
            assert_eq!(highest_assign_column(program,0,true),2);
        });
    }
    #[test]
    fn resolve_keeps_current() {
        super::decode_and("15080A0041D0313A4242D0323A43434343D033000000",true,|program| {
            assert_eq!(resolve(program,1,0,false),5);
            assert_eq!(resolve(program,1,7,false),7);
        });
    }
}
