use anyhow::{Context, Result};
use clap::Parser;
use excel_keyword_search::common::{language_name, MessageId};
use excel_keyword_search::{cli, config, export, logging, session};
use cli::{Cli, Commands};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use session::SearchSession;
use std::time::Duration;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load()?,
    };
    let mut session = SearchSession::new(config);

    if let Some(dir) = &cli.locales {
        session
            .load_locales(dir)
            .with_context(|| format!("ロケールの読み込みに失敗: {}", dir.display()))?;
    }
    if let Some(lang) = &cli.lang {
        if !session.use_language(lang) {
            eprintln!("未対応の言語です: {}", lang);
        }
    }

    match cli.command {
        Commands::Search { folder, keywords, export: csv_output, json } => {
            println!("{}\n", session.translator().text(MessageId::AppTitle));

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.enable_steady_tick(Duration::from_millis(100));

            let translator = session.translator().clone();
            let searching = |path: &std::path::Path| {
                let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
                spinner.set_message(translator.t(MessageId::Searching, &[("filename", &name)]));
            };
            let outcome = session.search_with_progress(&folder, &keywords, searching).map(|_| ());
            spinner.finish_and_clear();

            if let Err(e) = outcome {
                let message = session.error_message(&e);
                anyhow::bail!("{}: {}", session.translator().text(MessageId::Error), message);
            }

            print_table(&session);
            println!("\n{}", session.status_line());

            if let Some(results) = session.results() {
                for skipped in results.skipped_files() {
                    let error = skipped.error.as_deref().unwrap_or_default();
                    eprintln!(
                        "{}",
                        session.translator().t(
                            MessageId::ProcessingError,
                            &[("filepath", &skipped.path.display()), ("error", &error)],
                        )
                    );
                }
            }

            if let Some(output) = csv_output {
                let output_path = export::output_path_for_csv(&output);
                match session.export_csv(&output_path) {
                    Ok(()) => println!(
                        "✔ {}",
                        session
                            .translator()
                            .t(MessageId::SavedTo, &[("filepath", &output_path.display())])
                    ),
                    Err(e) => eprintln!("{}", session.error_message(&e)),
                }
            }

            if let Some(json_path) = json {
                if let Some(results) = session.results() {
                    let content = serde_json::to_string_pretty(results)?;
                    std::fs::write(&json_path, content)
                        .with_context(|| format!("write {}", json_path.display()))?;
                    println!(
                        "✔ {}",
                        session
                            .translator()
                            .t(MessageId::SavedTo, &[("filepath", &json_path.display())])
                    );
                }
            }
        }

        Commands::Config { set_language, show } => {
            if let Some(lang) = set_language {
                if session.change_language(&lang)? {
                    println!("✔ language = {}", lang);
                } else {
                    anyhow::bail!("未対応の言語です: {}", lang);
                }
            }

            if show {
                let config = session.config();
                println!("設定:");
                if let Some(path) = config.path() {
                    println!("  パス: {}", path.display());
                }
                println!("  言語: {}", config.language);
                println!("  ウィンドウ: {}", config.window_geometry);
                println!("  前回の検索パス: {}", config.last_search_path);
                println!("  テーマ: {}", config.theme);
            }
        }

        Commands::Languages => {
            let current = session.translator().language().to_string();
            for tag in session.translator().available_languages() {
                let marker = if tag == current { "*" } else { " " };
                println!("{} {:<8} {}", marker, tag, language_name(&tag));
            }
        }
    }

    Ok(())
}

fn print_table(session: &SearchSession) {
    let table = session.table();
    if table.is_empty() {
        return;
    }
    let columns = table.columns();
    println!("{}", table.headers(session.translator()).join("\t"));
    for row in &table.rows {
        println!("{}", row.values(columns).join("\t"));
    }
}
