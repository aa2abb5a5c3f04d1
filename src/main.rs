use std::path::{Path, PathBuf};

use clap::Parser;
use related_notes::{
    ConfigDb,
    Configuration,
    DataDir,
    PaneWorkspace,
    VaultCorpus,
    config::SettingKey,
    error,
    links,
    mcp,
    tokenizer,
};
use tracing_subscriber::EnvFilter;

mod cli;
mod prompt;

use cli::{Cli, Command, ConfigAction};

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("RELATED_NOTES_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> error::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        Command::Links(args) => cmd_links(&open_config(data_dir)?, &args)?,
        Command::Keywords(args) => {
            cmd_keywords(&open_config(data_dir)?, &args)?
        }
        Command::Config { action } => {
            let config_db = open_config(data_dir)?;
            match action {
                ConfigAction::Show { json } => config_show(&config_db, json)?,
                ConfigAction::Set { key, value } => {
                    config_set(&config_db, key, &value)?
                }
                ConfigAction::Reset => config_reset(&config_db)?,
            }
        }
        Command::Mcp(args) => {
            let config_db = open_config(data_dir)?;
            let config = config_db.configuration()?;
            let corpus = open_vault(&config_db, args.vault.as_deref())?;
            mcp::run_mcp(corpus, config)?;
        }
        Command::Completions(args) => args.generate(),
    }

    Ok(())
}

fn open_config(data_dir: Option<&Path>) -> error::Result<ConfigDb> {
    let data_dir = DataDir::resolve(data_dir)?;
    ConfigDb::open(&data_dir.config_db())
}

/// Open the vault from, in order: the --vault flag, the stored `vault`
/// setting, the current directory.
fn open_vault(
    config_db: &ConfigDb,
    explicit: Option<&Path>,
) -> error::Result<VaultCorpus> {
    let root = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_db.vault()? {
            Some(path) => path,
            None => std::env::current_dir()?,
        },
    };
    let corpus = VaultCorpus::open(&root)?;
    tracing::debug!(vault = %corpus.root().display(), "opened vault");
    Ok(corpus)
}

/// The workspace a command runs against: the named note, if any.
fn workspace_for(
    corpus: &VaultCorpus,
    note: Option<&PathBuf>,
    selection: Option<String>,
) -> error::Result<PaneWorkspace> {
    let active = note.map(|n| corpus.resolve(n)).transpose()?;
    Ok(PaneWorkspace::new(active).with_selection(selection))
}

fn cmd_links(config_db: &ConfigDb, args: &cli::LinksArgs) -> error::Result<()> {
    let mut config = config_db.configuration()?;
    if args.no_append {
        config.append_link = false;
    }
    let corpus = open_vault(config_db, args.vault.as_deref())?;
    let mut workspace =
        workspace_for(&corpus, args.note.as_ref(), args.selection.clone())?;

    let Some(navigator) =
        links::show_possible_links(&workspace, &corpus, &config)?
    else {
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(navigator.match_set())?);
        return Ok(());
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    prompt::run_session(
        &navigator,
        &corpus,
        &mut workspace,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )
}

fn cmd_keywords(
    config_db: &ConfigDb,
    args: &cli::KeywordsArgs,
) -> error::Result<()> {
    let config = config_db.configuration()?;
    let corpus = open_vault(config_db, args.vault.as_deref())?;
    let Some(note) = args.note.as_ref() else {
        return Ok(());
    };
    let doc = corpus.resolve(note)?;
    let text = links::read_note(&corpus, &doc);

    for keyword in
        tokenizer::extract_keywords(&text, args.selection.as_deref(), &config)
    {
        println!("{keyword}");
    }
    Ok(())
}

fn config_show(config_db: &ConfigDb, json: bool) -> error::Result<()> {
    let config = config_db.configuration()?;
    let vault = config_db
        .vault()?
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let mut entries = config.entries();
    entries.push((SettingKey::Vault, vault));

    if json {
        let map: serde_json::Map<String, serde_json::Value> = entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), json_value(key, &config, value)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for (key, value) in &entries {
            println!("{key}\t{value}");
        }
    }
    Ok(())
}

fn json_value(
    key: SettingKey,
    config: &Configuration,
    raw: String,
) -> serde_json::Value {
    match key {
        SettingKey::MinLetters => config.min_letters.into(),
        SettingKey::AppendLink => config.append_link.into(),
        _ => raw.into(),
    }
}

fn config_set(
    config_db: &ConfigDb,
    key: SettingKey,
    value: &str,
) -> error::Result<()> {
    let value = if key == SettingKey::Vault {
        let path = Path::new(value).canonicalize().map_err(|e| {
            error::Error::Config(format!("cannot resolve vault {value}: {e}"))
        })?;
        path.to_string_lossy().into_owned()
    } else {
        value.to_string()
    };

    config_db.update(key, &value)?;
    println!("Set {key} = {value}");
    Ok(())
}

fn config_reset(config_db: &ConfigDb) -> error::Result<()> {
    config_db.clear_settings()?;
    println!("Settings restored to defaults");
    Ok(())
}
