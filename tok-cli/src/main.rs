//! Linha de comando `tok`: tokeniza um stream de texto ou avalia uma
//! tokenização predita contra o gold.
//!
//! ```text
//! tok tokenize tok.test.txt -o predicted.txt
//! tok eval gold.txt predicted.txt
//! ```

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tok_core::{evaluate_files, DiffStyle, EvalOptions, TokenizePipeline, TokenizerMode};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tok", version, about = "Tokenizador por regras léxicas e avaliador por spans")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tokeniza o primeiro campo (tab) de cada linha; uma linha de tokens por linha de entrada.
    Tokenize {
        /// Arquivo de entrada (padrão: stdin).
        input: Option<PathBuf>,
        /// Arquivo de saída (padrão: stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Não normaliza contrações antes da varredura.
        #[arg(long)]
        raw: bool,
    },
    /// Compara a tokenização predita com a gold (último campo tab de cada linha).
    Eval {
        gold: PathBuf,
        predicted: PathBuf,
        /// Marca os tokens errados com [[...]] em vez de cores ANSI.
        #[arg(long)]
        plain: bool,
        /// Mostra só precisão, revocação e F1.
        #[arg(long)]
        no_diff: bool,
        /// Emite o relatório completo em JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(?err, "comando falhou");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Tokenize { input, output, raw } => {
            let mode = if raw {
                TokenizerMode::Raw
            } else {
                TokenizerMode::Standard
            };
            let pipeline = TokenizePipeline::new(mode);
            let writer: Box<dyn Write> = match output {
                Some(path) => Box::new(BufWriter::new(File::create(path)?)),
                None => Box::new(BufWriter::new(io::stdout().lock())),
            };
            match input {
                Some(path) => pipeline.tokenize_stream(BufReader::new(File::open(path)?), writer)?,
                None => pipeline.tokenize_stream(io::stdin().lock(), writer)?,
            };
        }
        Command::Eval {
            gold,
            predicted,
            plain,
            no_diff,
            json,
        } => {
            let report = evaluate_files(&gold, &predicted)?;
            let mut stdout = io::stdout().lock();
            if json {
                serde_json::to_writer_pretty(&mut stdout, &report)?;
                writeln!(stdout)?;
            } else {
                let options = EvalOptions {
                    diff_style: if plain { DiffStyle::Plain } else { DiffStyle::Ansi },
                    show_diff: !no_diff,
                };
                write!(stdout, "{}", report.render(options))?;
            }
        }
    }
    Ok(())
}
