use std::io::Read;

use anyhow::Context;

const INPUT: &str = "void * * x = 0;";

fn read_source() -> anyhow::Result<String> {
    match std::env::args().nth(1).as_deref() {
        None => Ok(INPUT.to_string()),
        Some("-") => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read from stdin")?;
            Ok(buffer)
        }
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read '{path}'"))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let source = read_source()?;

    match voidlang::parse_program(&source) {
        Ok(program) => {
            print!("{program}");
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.render(&source));
            Err(anyhow::anyhow!("parsing failed"))
        }
    }
}
