use clap::{Arg, ArgAction, Command};

use std::fs::File;
use std::process;

use container::{flash_encryption_operation, FlashParams};

struct Args {
    source: String,
    output: String,
    params: FlashParams,
}

fn parse_address(s: &str) -> Result<u32, String> {
    let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(rest) => (rest, 16),
        None => (s, 10),
    };
    u32::from_str_radix(digits, radix).map_err(|e| e.to_string())
}

fn get_args() -> Args {
    let matches = Command::new("Flash Container")
        .about("Firmware flash encryption and container packaging tool")
        .arg(Arg::new("source")
            .short('s')
            .long("source")
            .num_args(1)
            .required(true)
            .help("Firmware image to read"))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .num_args(1)
            .required(true)
            .help("Path the container is written to"))
        .arg(Arg::new("key")
            .short('k')
            .long("key")
            .num_args(1)
            .required(true)
            .help("Master key as a hex string (24 or 32 bytes)"))
        .arg(Arg::new("hmac-key")
            .long("hmac-key")
            .num_args(1)
            .required(true)
            .help("Key for the container integrity tag, as a hex string"))
        .arg(Arg::new("address")
            .short('a')
            .long("address")
            .value_parser(parse_address)
            .default_value("0x0")
            .help("Flash base address the image is built for, 0x prefix accepted"))
        .arg(Arg::new("conf")
            .short('c')
            .long("conf")
            .value_parser(clap::value_parser!(u8).range(0..=15))
            .default_value("15")
            .help("FLASH_CRYPT_CONF tweak mask (0-15)"))
        .arg(Arg::new("decrypt")
            .short('d')
            .long("decrypt")
            .action(ArgAction::SetTrue)
            .help("Decrypt the input instead of encrypting it"))
        .arg(Arg::new("fw-version")
            .long("fw-version")
            .num_args(1)
            .default_value("4.05")
            .help("Firmware version stored in the container header"))
        .get_matches();

    let mac_key = match hex::decode(matches.get_one::<String>("hmac-key").unwrap()) {
        Ok(key) => key,
        Err(e) => {
            eprintln!("Invalid HMAC key: {e}");
            process::exit(1);
        }
    };

    let params = FlashParams {
        key_hex: matches.get_one::<String>("key").unwrap().clone(),
        mac_key,
        flash_address: *matches.get_one::<u32>("address").unwrap(),
        flash_crypt_conf: *matches.get_one::<u8>("conf").unwrap(),
        do_decrypt: matches.get_flag("decrypt"),
        version: matches.get_one::<String>("fw-version").unwrap().clone(),
    };

    Args {
        source: matches.get_one::<String>("source").unwrap().clone(),
        output: matches.get_one::<String>("output").unwrap().clone(),
        params,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = get_args();

    let mut input = match File::open(&args.source) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Cannot open source file {}: {e}", args.source);
            process::exit(1);
        }
    };

    let mut output = match File::create(&args.output) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Cannot create output file {}: {e}", args.output);
            process::exit(1);
        }
    };

    let operation = if args.params.do_decrypt { "decrypt" } else { "encrypt" };
    println!("Started {operation} process...");

    if let Err(e) = flash_encryption_operation(&mut output, &mut input, &args.params) {
        eprintln!("Flash encryption operation failed: {e}");
        process::exit(1);
    }

    println!("Process done!");
}
