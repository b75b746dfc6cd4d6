mod cli;

use ghcl::{Document, ParseOptions};

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("GHCL_LOG"))
        .with_writer(std::io::stderr)
        .init();

    for new_path in cli.directory.iter() {
        match new_path.canonicalize() {
            Err(e) => {
                eprintln!(
                    "Failed to resolve path for -C/--directory {}\n{}",
                    new_path.display(),
                    e
                );
                std::process::exit(1);
            }
            Ok(cwd) => {
                if let Err(err) = std::env::set_current_dir(&cwd) {
                    eprintln!("Failed to set work directory to {}\n{}", cwd.display(), err);
                    std::process::exit(1);
                }

                tracing::info!(directory=%cwd.display(), "Changed working directory");
            }
        }
    }

    let command_result = match cli.command {
        cli::Command::Parse(cmd) => parse(cmd),
        cli::Command::Get(cmd) => get(cmd),
        cli::Command::Blocks(cmd) => blocks(cmd),
        cli::Command::Fmt(cmd) => fmt(cmd),
        cli::Command::Build(cmd) => build(cmd),
    };

    if let Err(e) = command_result {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

pub fn parse(cli: cli::ParseCommand) -> anyhow::Result<()> {
    let document = load(&cli.input)?;
    output(&cli.output, &document)
}

pub fn get(cli: cli::GetCommand) -> anyhow::Result<()> {
    let document = load(&cli.input)?;
    let Some(value) = document.attribute(&cli.name) else {
        anyhow::bail!("No attribute named '{}'", cli.name);
    };

    output(&cli.output, value)
}

pub fn blocks(cli: cli::BlocksCommand) -> anyhow::Result<()> {
    let document = load(&cli.input)?;

    let found = if cli.recursive {
        document.find_blocks(&cli.block_type)
    } else {
        document.blocks_by_type(&cli.block_type)
    };

    for block in found {
        match block.label() {
            Some(label) => println!("{} {label:?}", block.block_type()),
            None => println!("{}", block.block_type()),
        }
    }

    Ok(())
}

pub fn fmt(cli: cli::FmtCommand) -> anyhow::Result<()> {
    let document = load(&cli.input)?;
    print!("{document}");
    Ok(())
}

pub fn build(cli: cli::BuildCommand) -> anyhow::Result<()> {
    let document = load(&cli.input)?;
    let registry = ghcl::Registry::default();

    for block in document.blocks_by_type("object") {
        let object = registry.build(block)?;
        println!("{object:#?}");
    }

    Ok(())
}

fn load(input: &cli::InputArgs) -> anyhow::Result<Document> {
    let options = ParseOptions::new().max_depth(input.max_depth);

    let document = match &input.file {
        Some(path) => ghcl::parse_file_with(path, &options)?,
        None => {
            let stdin = std::io::read_to_string(std::io::stdin())?;
            ghcl::parse_str_with(&stdin, &options)?
        }
    };

    Ok(document)
}

fn output(output: &cli::OutputArgs, value: &impl serde::Serialize) -> anyhow::Result<()> {
    match output.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), value)?,
        cli::OutputFormat::Json => {
            serde_json::to_writer_pretty(std::io::stdout(), value)?;
            println!();
        }
    };

    Ok(())
}
