mod report;

use anyhow::{Context, ensure};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use lexis_errors::Renderer;
use text_size::{TextLen, TextRange};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Inspect the tokens, comments and nodes of a TOML file.
#[derive(Parser)]
#[command(version)]
enum Options {
    /// Print every token and comment.
    Tokens {
        path: Utf8PathBuf,
        /// Print JSON instead of one token per line.
        #[arg(long)]
        json: bool,
    },
    /// Print the node tree.
    Tree { path: Utf8PathBuf },
    /// Print the tokens and comments surrounding a byte range.
    Around {
        path: Utf8PathBuf,
        start: u32,
        end: u32,
        /// Number of matching tokens to pass over.
        #[arg(long, default_value_t = 0)]
        skip: usize,
        /// Let comments be returned as tokens.
        #[arg(long)]
        include_comments: bool,
    },
}

impl Options {
    fn path(&self) -> &Utf8Path {
        match self {
            Options::Tokens { path, .. } | Options::Tree { path } | Options::Around { path, .. } => {
                path
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = Options::parse();
    let path = options.path();
    let text =
        std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))?;
    let parse = lexis_toml::parse(&text);

    let renderer = Renderer::styled();
    for diagnostic in parse.diagnostics() {
        eprintln!("{}", diagnostic.render(&renderer, path.as_str(), &text));
    }

    let output = match options {
        Options::Tokens { json: false, .. } => report::tokens(&text, &parse),
        Options::Tokens { json: true, .. } => {
            report::tokens_json(&text, &parse).context("failed to serialize tokens")?
        }
        Options::Tree { .. } => parse.root().debug_dump(&text),
        Options::Around { start, end, skip, include_comments, .. } => {
            ensure!(start <= end, "range start {start} is past its end {end}");
            ensure!(
                end <= u32::from(text.text_len()),
                "range end {end} is past the end of `{path}`"
            );
            ensure!(
                text.is_char_boundary(start as usize) && text.is_char_boundary(end as usize),
                "range {start}..{end} splits a character"
            );

            let range = TextRange::new(start.into(), end.into());
            log::debug!("inspecting {range:?} with skip {skip}");
            report::around(&text, &parse.token_store(), range, skip, include_comments)
        }
    };

    print!("{output}");
    Ok(())
}
