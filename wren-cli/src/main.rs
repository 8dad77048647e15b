//! Wren CLI - HTML tokenizer inspector
//!
//! Usage:
//!   wren <file>                     Print the token stream
//!   wren <file> --json              Print tokens in html5lib JSON form
//!   wren --html '<p>hi</p>'         Tokenize an inline string
//!   wren <file> --strict            Stop at the first parse error

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use wren_common::warning::{clear_warnings, warning_count};
use wren_html::{HTMLTokenizer, Token, TokenizerOptions, TokenizerState, html5lib};

/// Wren - tokenize HTML and print the tokens
#[derive(Parser, Debug)]
#[command(name = "wren")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Tokenize a file
    wren ./index.html

    # Tokenize an inline string as html5lib JSON
    wren --html '<a href=x>&amp;</a>' --json

    # Start inside a <textarea>
    wren --html 'a</textarea>' --initial-state RCDATA --last-start-tag textarea
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Tokenize this string instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Fail on the first parse error
    #[arg(long)]
    strict: bool,

    /// State to start in (e.g. Data, RCDATA, RAWTEXT, ScriptData, PLAINTEXT)
    #[arg(long, value_name = "STATE", default_value = "Data")]
    initial_state: TokenizerState,

    /// Name of the last start tag, for end tag matching in text states
    #[arg(long, value_name = "TAG")]
    last_start_tag: Option<String>,

    /// Treat <![CDATA[ as a CDATA section
    #[arg(long)]
    cdata: bool,

    /// Do not switch text states after <title>, <script>, <style> and friends
    #[arg(long)]
    no_switch: bool,

    /// Print tokens as html5lib JSON
    #[arg(short, long)]
    json: bool,

    /// Log each parse error as it happens
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let html = load_input(&cli)?;
    let options = TokenizerOptions::default()
        .with_strict(cli.strict)
        .with_initial_state(cli.initial_state)
        .with_last_start_tag(cli.last_start_tag.clone())
        .with_allow_cdata(cli.cdata)
        .with_switch_text_modes(!cli.no_switch)
        .with_log_parse_errors(cli.verbose);

    clear_warnings();
    let tokens = HTMLTokenizer::tokenize_with(&html, options)?;

    if cli.json {
        let projected = html5lib::project(&tokens);
        println!(
            "{}",
            serde_json::to_string_pretty(&projected).context("failed to serialize tokens")?
        );
        return Ok(());
    }

    print_tokens(&tokens);
    if cli.verbose {
        eprintln!("{} distinct warnings", warning_count());
    }
    Ok(())
}

/// Read the input named on the command line.
fn load_input(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
    } else {
        bail!("no input: pass a file path or --html")
    }
}

fn print_tokens(tokens: &[Token]) {
    let errors = tokens.iter().filter(|token| token.is_parse_error()).count();
    println!(
        "{}",
        format!("=== HTML Tokens ({}, {errors} parse errors) ===", tokens.len()).bold()
    );
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::ParseError { .. } => println!("  {i:3}: {}", token.yellow()),
            Token::StartTag { .. } | Token::EndTag { .. } => println!("  {i:3}: {}", token.cyan()),
            Token::Comment { .. } | Token::Doctype { .. } => println!("  {i:3}: {}", token.green()),
            Token::EndOfFile => println!("  {i:3}: {}", token.dimmed()),
            Token::Character { .. } => println!("  {i:3}: {token}"),
        }
    }
}
