use std::path::Path;
use std::process::ExitCode;

use hwam::transform::{decode_file, encode_file};

fn show_instructions() {
    eprintln!("Usage: hwam <pathToFile> <option>");
    eprintln!("Options:");
    eprintln!("  -W : encode a file into its .hwam protected form");
    eprintln!("  -R : decode a .hwam protected file");
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Error: wrong number of arguments");
        show_instructions();
        return ExitCode::from(2);
    }

    let path = Path::new(&args[1]);
    let result = match args[2].as_str() {
        "-W" => encode_file(path),
        "-R" => decode_file(path),
        other => {
            eprintln!("Error: invalid option '{other}'");
            show_instructions();
            return ExitCode::from(2);
        }
    };

    match result {
        Ok((output, report)) => {
            println!("generated \"{}\" ({} units)", output.display(), report.units);
            if report.corrected > 0 {
                println!("corrected {} single-bit error(s)", report.corrected);
            }
            if report.dropped > 0 {
                println!("dropped {} uncorrectable unit(s)", report.dropped);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
