use cmdargs_parser::{ParseOptions, ParsedArgs};

fn main() {
    let input = "--name 'hello world' -vx 3 --tag a --tag b input.txt -- --raw";

    let options = ParseOptions::new().combinable_arguments(["tag"]);
    let parsed = ParsedArgs::parse_with(input, &options);

    for arg in parsed.argument_list() {
        println!("{} = {:?}", arg.key, arg.value);
    }

    for (key, value) in parsed.argument_dictionary() {
        println!("{key}: {value:?}");
    }

    println!("operands: {:?}", parsed.operand_list());

    if parsed["name"].as_single() != Some("hello world") {
        panic!("invalid name");
    }

    if parsed["tag"].len() != 2 {
        panic!("invalid tags");
    }
}
