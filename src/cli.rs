use clap::{value_parser, crate_version, Arg, ArgAction, Command, ValueHint};

const CONFIG_LONG_HELP: &str = "JSON string with categories `listing` and `wrap`, e.g.
'{\"listing\": {\"splitComments\": true}, \"wrap\": {\"print\": 0}}'
Individual flags override whatever is in the JSON.";

fn file_arg(help: &'static str) -> Arg {
    Arg::new("file").short('f').long("file").value_name("PATH").help(help)
        .value_hint(ValueHint::FilePath)
        .required(false)
}

fn name_arg() -> Arg {
    Arg::new("name").short('n').long("name").value_name("NAME").help("program name shown in the header")
        .required(false)
}

fn flag_arg(id: &'static str,help: &'static str) -> Arg {
    Arg::new(id).long(id).help(help).action(ArgAction::SetTrue)
}

fn listing_args(cmd: Command) -> Command {
    cmd.arg(file_arg("path to tokenized program, omit to read stdin"))
        .arg(name_arg())
        .arg(Arg::new("config").long("config").value_name("JSON").help("listing settings")
            .long_help(CONFIG_LONG_HELP)
            .required(false))
        .arg(flag_arg("split-rem","put trailing REM statements on their own row"))
        .arg(flag_arg("no-align","do not align assignments"))
        .arg(flag_arg("no-targets","do not mark branch sources and destinations"))
        .arg(flag_arg("no-header","omit name, length, and load address"))
        .arg(flag_arg("only-targets","only show line numbers that are branch destinations"))
        .arg(Arg::new("wrap").long("wrap").value_name("WIDTH").help("wrap long PRINT strings, 0 disables")
            .value_parser(value_parser!(usize))
            .required(false))
}

pub fn build_cli() -> Command {
    let long_help = "a2list is always invoked with exactly one of several subcommands.
The subcommands are designed to function as nodes in a pipeline.
Set RUST_LOG environment variable to control logging level.
  levels: trace,debug,info,warn,error

Examples:
---------
list a program:        `a2list list -f prog.atok`
list from a pipeline:  `a2kit get -f prog -t atok -d myimg.dsk | a2list list -n prog`
hex dump by line:      `a2list dump -f prog.atok`
disassemble:           `a2list dasm -a 768 -f routine.bin`";

    let mut main_cmd = Command::new("a2list")
        .about("Structured listings of tokenized Applesoft BASIC.")
        .after_long_help(long_help)
        .version(crate_version!());

    main_cmd = main_cmd.subcommand(
        listing_args(Command::new("list"))
            .about("read tokenized program, write indented listing to stdout")
    );
    main_cmd = main_cmd.subcommand(
        listing_args(Command::new("dump"))
            .about("read tokenized program, write hex dump of each line to stdout")
    );
    main_cmd = main_cmd.subcommand(
        Command::new("dasm")
            .arg(file_arg("path to machine code, omit to read stdin"))
            .arg(Arg::new("addr").short('a').long("addr").value_name("ADDRESS")
                .help("address of the first byte, decimal or $hex").required(false))
            .about("disassemble 6502 machine code")
    );
    main_cmd = main_cmd.subcommand(
        Command::new("completions")
            .arg(Arg::new("shell").short('s').long("shell").value_name("SHELL").help("type of shell")
                .required(true)
                .value_parser(["bash","elv","fish","ps1","zsh"]))
            .about("write shell completion script to stdout")
    );
    main_cmd
}
