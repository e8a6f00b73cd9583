use greet::{CommandLineParser, Counter, Flag, Multi, Parameter, Single};

fn main() {
    let mut name: String = String::default();
    let mut age: u32 = 0;
    let mut greeted: bool = false;
    let mut times: usize = 0;
    let mut places: Vec<String> = Vec::default();
    let mut rest: Vec<String> = Vec::default();

    let parser = CommandLineParser::new("greet")
        .about("greet with a person")
        .version("greet v0.1.0")
        .add(
            Parameter::option(Single::new(&mut name), Some("name"), Some('n'))
                .required()
                .help("Name of the person to greet"),
        )
        .add(
            Parameter::option(Single::new(&mut age).default(18), Some("age"), None)
                .help("Age of the person to greet"),
        )
        .add(Parameter::option(Flag::new(&mut greeted), None, Some('g')).help("Have greeted before"))
        .add(
            Parameter::option(Counter::new(&mut times), None, Some('t'))
                .help("How many times you want to greet"),
        )
        .add(
            Parameter::option(Multi::new(&mut places), Some("place"), Some('p'))
                .allow_hyphen()
                .help("Where to greet"),
        )
        .ignored(&mut rest)
        .build();

    parser.parse();

    println!("I will greet {name}");
    println!("They are {age} years old");

    if greeted {
        println!("We have greeted before");
    } else {
        println!("We never greeted before");
    }

    println!("We should greet {times} times");
    println!("We may greet at {} places:", places.len());

    for place in &places {
        println!("\t{place}");
    }

    if !rest.is_empty() {
        println!("Ignored: {rest:?}");
    }
}
