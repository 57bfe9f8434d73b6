use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, bail, Context};
use tracing_subscriber::EnvFilter;

use rsa_hybrid::rsa::{KeyGenerationParams, KeyGenerator, KeySize, Seed};
use rsa_hybrid::util::file_ops::{self, Mode};

const USAGE: &str = "\
usage:
  rsa-hybrid genkey <owner> [--bits 1024|2048|4096] [--deterministic] [--out-dir <dir>]
  rsa-hybrid encrypt|-e <public-key> <input> <output>
  rsa-hybrid decrypt|-d <private-key> <input> <output>";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    GenKey {
        owner: String,
        key_size: KeySize,
        deterministic: bool,
        out_dir: PathBuf,
    },
    Process {
        mode: Mode,
        key: PathBuf,
        input: PathBuf,
        output: PathBuf,
    },
}

fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let (command, rest) = args.split_first().ok_or_else(|| anyhow!("missing command"))?;

    if command == "genkey" {
        let mut owner = None;
        let mut key_size = KeySize::default();
        let mut deterministic = false;
        let mut out_dir = PathBuf::from(".");

        let mut iter = rest.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--bits" => {
                    let bits: u64 = iter
                        .next()
                        .ok_or_else(|| anyhow!("--bits needs a value"))?
                        .parse()
                        .context("--bits must be an integer")?;
                    key_size = KeySize::try_from(bits)?;
                }
                "--deterministic" => deterministic = true,
                "--out-dir" => {
                    out_dir = iter
                        .next()
                        .ok_or_else(|| anyhow!("--out-dir needs a value"))?
                        .into();
                }
                flag if flag.starts_with("--") => bail!("unknown option {}", flag),
                name if owner.is_none() => owner = Some(name.to_string()),
                extra => bail!("unexpected argument {}", extra),
            }
        }

        let owner = owner.ok_or_else(|| anyhow!("genkey needs an owner name"))?;
        return Ok(Command::GenKey {
            owner,
            key_size,
            deterministic,
            out_dir,
        });
    }

    let mode: Mode = command.parse()?;
    match rest {
        [key, input, output] => Ok(Command::Process {
            mode,
            key: key.into(),
            input: input.into(),
            output: output.into(),
        }),
        _ => bail!("{} needs <key> <input> <output>", mode),
    }
}

fn execute(command: Command) -> anyhow::Result<()> {
    match command {
        Command::GenKey {
            owner,
            key_size,
            deterministic,
            out_dir,
        } => {
            let params = if deterministic {
                KeyGenerationParams::seeded(Seed::from(owner.as_str()), key_size)
            } else {
                KeyGenerationParams::new(key_size)
            };
            let keypair = KeyGenerator::default()
                .generate(&params)
                .with_context(|| format!("generating {}-bit key pair for {}", key_size, owner))?;
            file_ops::export_keys(&keypair, &out_dir, &owner)
                .with_context(|| format!("exporting keys to {}", out_dir.display()))?;
        }
        Command::Process {
            mode,
            key,
            input,
            output,
        } => {
            file_ops::run(mode, &key, &input, &output)
                .with_context(|| format!("failed to {} {}", mode, input.display()))?;
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {:#}\n\n{}", e, USAGE);
            process::exit(2);
        }
    };

    if let Err(e) = execute(command) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
