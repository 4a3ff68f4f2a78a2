//! Wordlist Forge - candidate wordlist generation for penetration testing
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;
use std::time::Instant;

use wordlist_forge::cli::{Cli, Command, FieldsArgs, GenerateArgs, PresetAction, PreviewArgs};
use wordlist_forge::fields;
use wordlist_forge::generator::Generator;
use wordlist_forge::output::OutputSink;
use wordlist_forge::presets::PresetManager;
use wordlist_forge::progress::{
    create_progress_bar, create_spinner, format_number, print_banner, print_bullet, print_error,
    print_header, print_info, print_run_summary, print_success,
};
use wordlist_forge::transforms;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Set up logging
    if cli.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if !cli.quiet {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    // Run the application
    if let Err(e) = run(cli) {
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Generate(args) => cmd_generate(args, cli.quiet),
        Command::Preview(args) => cmd_preview(args, cli.quiet),
        Command::Fields(args) => cmd_fields(args),
        Command::Presets { action } => cmd_presets(action),
        Command::Transforms => cmd_transforms(),
    }
}

fn cmd_generate(args: GenerateArgs, quiet: bool) -> anyhow::Result<()> {
    let presets = PresetManager::new()?;
    let config = args.build_config(&presets)?;

    // Decoration goes to the terminal only when tokens go to a file;
    // a stdout token stream must stay clean for piping.
    let decorate = !quiet && args.output.is_some();

    let mut generator = Generator::new(config)?;
    let estimated = generator.estimate_count();

    if decorate {
        print_banner();
        print_header("Generation plan");
        print_info(&format!("Estimated candidates: {}", format_number(estimated)));
        if let Some(name) = &args.preset {
            print_info(&format!("Preset: {}", name));
        }
    }

    let bar = if decorate {
        if estimated <= u64::MAX as u128 {
            create_progress_bar(estimated as u64, "Generating...")
        } else {
            create_spinner("Generating...")
        }
    } else {
        indicatif::ProgressBar::hidden()
    };

    let start = Instant::now();
    let mut sink = OutputSink::new(args.output.clone())?;

    for token in generator.by_ref() {
        sink.write_line(&token)?;
        bar.inc(1);
    }
    sink.flush()?;
    bar.finish_and_clear();

    let stats = generator.stats();
    if decorate {
        if let Some(path) = sink.path() {
            print_success(&format!(
                "Wrote {} tokens to {}",
                format_number(stats.tokens_generated),
                path.display()
            ));
        }
        print_run_summary(&stats, sink.bytes_written(), start.elapsed());
    }

    Ok(())
}

fn cmd_preview(args: PreviewArgs, quiet: bool) -> anyhow::Result<()> {
    let presets = PresetManager::new()?;
    let mut config = args.generate.build_config(&presets)?;

    // A preview never walks more of the space than it shows
    config.max_lines = Some(match config.max_lines {
        Some(cap) => cap.min(args.count),
        None => args.count,
    });

    let generator = Generator::new(config)?;
    let samples: Vec<String> = generator.collect();

    if !quiet {
        print_header(&format!("Sample output ({} tokens)", samples.len()));
    }
    for (i, token) in samples.iter().enumerate() {
        println!("  {:3}. {}", i + 1, token);
    }

    Ok(())
}

fn cmd_fields(args: FieldsArgs) -> anyhow::Result<()> {
    if args.categories {
        print_header("Field categories");
        for category in fields::list_categories() {
            print_bullet(category);
        }
    } else if let Some(category) = &args.category {
        print_header(&format!("Fields in category '{}'", category));
        for field in fields::fields_by_category(category) {
            print_bullet(&format!("{:30} ({})", field.id, field.group));
        }
    } else if let Some(term) = &args.search {
        print_header(&format!("Search results for '{}'", term));
        for field in fields::search_fields(term) {
            print_bullet(&format!(
                "{:30} [{}/{}]",
                field.id, field.category, field.group
            ));
        }
    } else {
        let all = fields::list_fields();
        print_header(&format!("All fields ({} total)", all.len()));
        for id in &all {
            print_bullet(id);
        }
    }

    Ok(())
}

fn cmd_presets(action: PresetAction) -> anyhow::Result<()> {
    let manager = PresetManager::new()?;

    match action {
        PresetAction::List => {
            print_header("Available presets");
            for name in manager.list_presets() {
                match manager.get_preset(&name) {
                    Ok(preset) => print_bullet(&format!("{:25} - {}", name, preset.description)),
                    Err(_) => print_bullet(&name),
                }
            }
        }
        PresetAction::Show { name } => {
            println!("{}", manager.show_preset(&name)?);
        }
        PresetAction::Delete { name } => {
            manager.delete_preset(&name)?;
            print_success(&format!("Deleted preset: {}", name));
        }
    }

    Ok(())
}

fn cmd_transforms() -> anyhow::Result<()> {
    print_header("Available transforms");
    for name in transforms::list_transforms() {
        print_bullet(name);
    }
    Ok(())
}
