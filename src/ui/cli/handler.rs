// Mon Oct 19 2026 - Alex

use super::args::{Args, Command, DiffArgs, GenerateArgs, LookupArgs};
use crate::config::Config;
use crate::diff::DatabaseDiff;
use crate::header::FsHeaderSource;
use crate::output::{default_output_path, JsonSerializer, ReportFormat, ReportGenerator};
use crate::ui::banner::Banner;
use crate::vtable::VTableDbGenerator;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::time::{Duration, Instant};

pub struct CommandHandler {
    quiet: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    pub fn execute(&mut self, args: Args) -> anyhow::Result<()> {
        self.quiet = args.quiet;
        if args.no_color {
            colored::control::set_override(false);
        }
        if !args.quiet {
            Banner::for_command(&args.command).print();
        }

        self.setup_logging(&args)?;

        match args.command {
            Command::Generate(gen_args) => self.handle_generate(gen_args),
            Command::Diff(diff_args) => self.handle_diff(diff_args),
            Command::Lookup(lookup_args) => self.handle_lookup(lookup_args),
        }
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        };
        let level = if args.quiet { level.min(log::LevelFilter::Warn) } else { level };

        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .try_init()?;

        Ok(())
    }

    fn handle_generate(&self, args: GenerateArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;
        let start_time = Instant::now();

        let mut config = match &args.classes {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        let parallel = args.parallel || config.parallel_scan;
        config = config
            .with_version(&args.version)
            .with_source_root(args.source_root.clone())
            .with_parallel_scan(parallel);
        if let Some(threads) = args.threads {
            config.max_threads = threads;
        }
        if !args.editor_macros.is_empty() {
            config = config.with_editor_macros(args.editor_macros.clone());
        }

        println!("{} Engine source: {}", "[*]".blue(), args.source_root.display());
        println!("{} Classes: {}", "[*]".blue(), config.classes.len());

        let spinner = self.spinner("Scanning headers...")?;
        let source = FsHeaderSource::new(&config.source_root);
        let generator = VTableDbGenerator::new(config)?;
        let generation = generator.generate(&source);
        if let Some(pb) = &spinner {
            pb.finish_and_clear();
        }
        let generation = generation?;

        let output = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.version));
        JsonSerializer::new()
            .with_pretty_print(!args.compact)
            .serialize_to_file(&generation.database, &output)?;
        println!("{} VTable DB written to: {}", "[+]".green(), output.display());

        let report = ReportGenerator::new(ReportFormat::Text)
            .with_functions(args.show_functions)
            .generate(&generation.database, &generation.diagnostics);
        println!();
        print!("{}", report);

        if let Some(md_path) = &args.markdown_output {
            let markdown = ReportGenerator::new(ReportFormat::Markdown)
                .with_functions(true)
                .generate(&generation.database, &generation.diagnostics);
            match fs::write(md_path, markdown) {
                Ok(()) => println!("{} Markdown report saved to: {}", "[+]".green(), md_path.display()),
                Err(e) => eprintln!("{} Failed to save markdown report: {}", "[!]".red(), e),
            }
        }

        if !generation.diagnostics.is_empty() {
            println!(
                "{} {} diagnostics, see above",
                "[!]".yellow(),
                generation.diagnostics.len()
            );
        }
        println!(
            "{} Done in {:.2}s",
            "[+]".green(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(())
    }

    fn handle_diff(&self, args: DiffArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let serializer = JsonSerializer::new();
        let old = serializer.deserialize_from_file(&args.old)?;
        let new = serializer.deserialize_from_file(&args.new)?;

        let diff = DatabaseDiff::between(&old, &new);
        print!("{}", diff);

        if diff.is_identical() {
            println!("{}", "No vtable layout changes".green());
        } else if args.fail_on_change {
            anyhow::bail!("vtable layouts differ between {} and {}", old.version, new.version);
        }
        Ok(())
    }

    fn handle_lookup(&self, args: LookupArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let db = JsonSerializer::new().deserialize_from_file(&args.db)?;
        if db.get(&args.class).is_none() {
            anyhow::bail!("class {} is not in {}", args.class, args.db.display());
        }

        let hit = match (&args.index, &args.name) {
            (Some(index), _) => db.slot_name(&args.class, *index),
            (None, Some(name)) => db.find_function(&args.class, name),
            (None, None) => None,
        };

        match hit {
            Some(lookup) => println!(
                "{}: {} (declared in {})",
                args.class,
                lookup.entry.to_string().cyan(),
                lookup.class_name
            ),
            None => println!("{} {}: no matching slot", "[!]".yellow(), args.class),
        }
        Ok(())
    }

    fn spinner(&self, message: &str) -> anyhow::Result<Option<ProgressBar>> {
        if self.quiet {
            return Ok(None);
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Ok(Some(pb))
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
