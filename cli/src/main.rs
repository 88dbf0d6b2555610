//! mdshape CLI - document structure recovery tool

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use mdshape::recover::{classify_units, LineKind};
use mdshape::render::{to_json, to_markdown, to_text};
use mdshape::{
    detect_format_from_bytes, detect_profile, ConvertOptions, ConverterRegistry,
    DocumentConverter, DocumentModel, ExtractionStats, HeadingKeywords, JsonFormat, NormalizePreset,
    OutputFormat, ProfileSet, RawUnit, RecoverOptions, ReplacementTable,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "mdshape")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Recover document structure from text and emit normalized Markdown", long_about = None)]
struct Cli {
    /// Input file (.txt, .md, .json unit stream)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    pipeline: PipelineArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert to all formats (Markdown, text, JSON)
    Convert {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Convert to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Start with `# title` when no heading carries the title
        #[arg(long)]
        title_heading: bool,

        /// Maximum heading level (1-6)
        #[arg(long)]
        max_heading: Option<u8>,

        /// Unordered list marker (-, * or +)
        #[arg(long)]
        list_marker: Option<char>,

        /// Print block statistics to stderr
        #[arg(long)]
        stats: bool,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Convert to plain text
    Text {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Convert to JSON
    Json {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Show document information and outline
    Info {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Show how each line is classified
    Classify {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Convert many files in parallel
    Batch {
        /// Input files
        #[arg(value_name = "FILES", required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "mdshape_output")]
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "markdown")]
        format: FormatArg,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Show version information
    Version,
}

/// Options shared by every command that runs the pipeline.
#[derive(Args, Clone, Default)]
struct PipelineArgs {
    /// Pipeline configuration (JSON with `recover`, `normalize` and `render` sections)
    #[arg(long, value_name = "FILE", env = "MDSHAPE_CONFIG")]
    config: Option<PathBuf>,

    /// Document-type profiles (JSON), replacing the bundled set
    #[arg(long, value_name = "FILE")]
    profiles: Option<PathBuf>,

    /// OCR correction table (JSON object mapping wrong to right)
    #[arg(long, value_name = "FILE")]
    corrections: Option<PathBuf>,

    /// Chapter and section keyword table (JSON); the bundled table when no file is given
    #[arg(long, value_name = "FILE")]
    heading_keywords: Option<Option<PathBuf>>,

    /// Text cleanup preset
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,

    /// Title hint; otherwise the first heading, then the file stem
    #[arg(long)]
    title: Option<String>,
}

impl PipelineArgs {
    /// Load the configuration file and apply flag overrides.
    fn convert_options(&self) -> CliResult<ConvertOptions> {
        let mut options = match &self.config {
            Some(path) => mdshape::data::load_json::<ConvertOptions, _>(path)?,
            None => ConvertOptions::new(),
        };
        if let Some(level) = self.cleanup {
            options = options.with_cleanup(level.into());
        }
        if let Some(title) = &self.title {
            options = options.with_title(title.clone());
        }
        Ok(options)
    }

    fn has_tables(&self) -> bool {
        self.profiles.is_some() || self.corrections.is_some() || self.heading_keywords.is_some()
    }

    /// Install the profile, correction and keyword tables given on the
    /// command line.
    fn apply_tables(&self, mut recover: RecoverOptions) -> CliResult<RecoverOptions> {
        if let Some(path) = &self.profiles {
            recover = recover.with_profiles(ProfileSet::from_path(path)?);
        }
        if let Some(path) = &self.corrections {
            recover = recover.with_corrections(ReplacementTable::from_path(path)?);
        }
        match &self.heading_keywords {
            Some(Some(path)) => {
                recover = recover.with_heading_keywords(HeadingKeywords::from_path(path)?);
            }
            Some(None) => recover = recover.with_heading_keywords(HeadingKeywords::builtin()),
            None => {}
        }
        Ok(recover)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (whitespace, empty blocks, heading order)
    Minimal,
    /// Standard cleanup (default)
    Standard,
    /// Aggressive cleanup (Unicode and punctuation normalization)
    Aggressive,
}

impl From<CleanupLevel> for NormalizePreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => NormalizePreset::Minimal,
            CleanupLevel::Standard => NormalizePreset::Standard,
            CleanupLevel::Aggressive => NormalizePreset::Aggressive,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Markdown
    Markdown,
    /// Plain text
    Text,
    /// JSON document model
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            pipeline,
        }) => cmd_convert(&input, output.as_deref(), &pipeline),
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            title_heading,
            max_heading,
            list_marker,
            stats,
            pipeline,
        }) => cmd_markdown(
            &input,
            output.as_deref(),
            MarkdownFlags {
                frontmatter,
                title_heading,
                max_heading,
                list_marker,
                stats,
            },
            &pipeline,
        ),
        Some(Commands::Text {
            input,
            output,
            pipeline,
        }) => cmd_text(&input, output.as_deref(), &pipeline),
        Some(Commands::Json {
            input,
            output,
            compact,
            pipeline,
        }) => cmd_json(&input, output.as_deref(), compact, &pipeline),
        Some(Commands::Info { input, pipeline }) => cmd_info(&input, &pipeline),
        Some(Commands::Classify { input, pipeline }) => cmd_classify(&input, &pipeline),
        Some(Commands::Batch {
            inputs,
            output,
            format,
            pipeline,
        }) => cmd_batch(&inputs, &output, format.into(), &pipeline),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &cli.pipeline)
            } else {
                println!("{}", "Usage: mdshape <FILE> [OUTPUT]".yellow());
                println!("       mdshape --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// One input file with its converter and resolved options.
struct Source {
    converter: Arc<dyn DocumentConverter>,
    bytes: Vec<u8>,
    options: ConvertOptions,
    fallback_title: Option<String>,
}

impl Source {
    fn load(input: &Path, args: &PipelineArgs) -> CliResult<Self> {
        let bytes = fs::read(input)?;
        let converter = select_converter(&ConverterRegistry::with_defaults(), input, &bytes)?;

        let mut options = args.convert_options()?;
        if args.has_tables() {
            let base = options
                .recover
                .take()
                .unwrap_or_else(|| converter.default_recover_options());
            options.recover = Some(args.apply_tables(base)?);
        }
        Ok(Self {
            converter,
            bytes,
            options,
            fallback_title: file_title(input),
        })
    }

    fn recover_options(&self) -> RecoverOptions {
        match &self.options.recover {
            Some(recover) => recover.clone(),
            None => self.converter.default_recover_options(),
        }
    }

    fn units(&self) -> CliResult<Vec<RawUnit>> {
        Ok(self.converter.read_units(&self.bytes)?)
    }

    fn recover(&self) -> CliResult<DocumentModel> {
        let mut doc = self.converter.recover_bytes(&self.bytes, &self.options)?;
        if doc.title.is_empty() {
            doc.title = self.fallback_title.clone().unwrap_or_default();
        }
        Ok(doc)
    }
}

/// Pick a converter by extension, sniffing the content when the extension
/// is missing or unknown.
fn select_converter(
    registry: &ConverterRegistry,
    input: &Path,
    bytes: &[u8],
) -> CliResult<Arc<dyn DocumentConverter>> {
    if let Ok(converter) = registry.get_for_path(input) {
        return Ok(converter);
    }

    let format = detect_format_from_bytes(bytes);
    log::debug!("{}: treating input as {}", input.display(), format);
    registry
        .get_by_extension(format.extension())
        .ok_or_else(|| format!("No converter for {}", format).into())
}

fn file_title(input: &Path) -> Option<String> {
    let stem = input.file_stem()?.to_str()?;
    let stem = stem.strip_suffix(".units").unwrap_or(stem);
    (!stem.trim().is_empty()).then(|| stem.trim().to_string())
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", content);
    }
    Ok(())
}

fn cmd_convert(input: &Path, output: Option<&Path>, args: &PipelineArgs) -> CliResult<()> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Recovering structure...");
    let source = Source::load(input, args)?;
    let doc = source.recover()?;
    pb.inc(1);

    pb.set_message("Generating Markdown...");
    let render_options = source.options.render.clone().with_frontmatter(true);
    fs::write(output_dir.join("extract.md"), to_markdown(&doc, &render_options))?;
    pb.inc(1);

    pb.set_message("Generating text...");
    fs::write(output_dir.join("extract.txt"), to_text(&doc))?;
    pb.inc(1);

    pb.set_message("Generating JSON...");
    fs::write(output_dir.join("content.json"), to_json(&doc, JsonFormat::Pretty)?)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} extract.md", "├─".dimmed());
    println!("  {} extract.txt", "├─".dimmed());
    println!("  {} content.json", "└─".dimmed());

    Ok(())
}

struct MarkdownFlags {
    frontmatter: bool,
    title_heading: bool,
    max_heading: Option<u8>,
    list_marker: Option<char>,
    stats: bool,
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    flags: MarkdownFlags,
    args: &PipelineArgs,
) -> CliResult<()> {
    let source = Source::load(input, args)?;
    let doc = source.recover()?;

    let mut render_options = source.options.render.clone();
    if flags.frontmatter {
        render_options = render_options.with_frontmatter(true);
    }
    if flags.title_heading {
        render_options = render_options.with_title_heading(true);
    }
    if let Some(level) = flags.max_heading {
        render_options = render_options.with_max_heading(level);
    }
    if let Some(marker) = flags.list_marker {
        render_options = render_options.with_list_marker(marker);
    }

    let markdown = to_markdown(&doc, &render_options);
    write_or_print(output, &markdown)?;

    if flags.stats {
        let mut stats = ExtractionStats::from_document(&doc);
        stats.count_text(&doc.plain_text());
        eprintln!(
            "{} {} blocks, {} headings, {} words",
            "Stats:".cyan(),
            stats.block_count(),
            stats.heading_count,
            stats.word_count
        );
    }

    Ok(())
}

fn cmd_text(input: &Path, output: Option<&Path>, args: &PipelineArgs) -> CliResult<()> {
    let doc = Source::load(input, args)?.recover()?;
    write_or_print(output, &to_text(&doc))
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    args: &PipelineArgs,
) -> CliResult<()> {
    let doc = Source::load(input, args)?.recover()?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let mut json = to_json(&doc, format)?;
    json.push('\n');
    write_or_print(output, &json)
}

fn cmd_info(input: &Path, args: &PipelineArgs) -> CliResult<()> {
    let source = Source::load(input, args)?;
    let units = source.units()?;
    let recover_options = source.recover_options();
    let profile = detect_profile(&units, &recover_options.profiles);
    let doc = source.recover()?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Converter".bold(), source.converter.name());
    println!("{}: {}", "Units".bold(), units.len());
    println!(
        "{}: {}",
        "Profile".bold(),
        profile.map(|p| p.type_name.as_str()).unwrap_or("none")
    );
    if !doc.title.is_empty() {
        println!("{}: {}", "Title".bold(), doc.title);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let mut stats = ExtractionStats::from_document(&doc);
    stats.count_text(&doc.plain_text());

    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!(
        "{}: {} ({} items)",
        "Lists".bold(),
        stats.list_count,
        stats.list_item_count
    );
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Code blocks".bold(), stats.code_block_count);
    println!("{}: {}", "Quotes".bold(), stats.quote_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Links".bold(), stats.link_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    if stats.heading_count > 0 {
        println!();
        println!("{}", "Outline".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (level, text) in doc.headings() {
            let indent = "  ".repeat(usize::from(level.saturating_sub(1)));
            println!("{}{} {}", indent, format!("H{}", level).dimmed(), text);
        }
    }

    Ok(())
}

fn cmd_classify(input: &Path, args: &PipelineArgs) -> CliResult<()> {
    let source = Source::load(input, args)?;
    let recover_options = source.recover_options();
    let units: Vec<RawUnit> = source
        .units()?
        .into_iter()
        .map(|unit| RawUnit {
            text: recover_options.corrections.apply(&unit.text),
            ..unit
        })
        .collect();

    let profile = detect_profile(&units, &recover_options.profiles);
    if let Some(profile) = profile {
        println!("{}: {}", "Profile".bold(), profile.type_name);
    }

    let kinds = classify_units(&units, &recover_options, profile);
    for (unit, kind) in units.iter().zip(&kinds) {
        let name = format!("{:<16}", kind.name());
        let name = match kind {
            LineKind::Heading { .. } | LineKind::HeadingCandidate { .. } => name.cyan().bold(),
            LineKind::ListItem { .. } | LineKind::TableRow { .. } => name.green(),
            LineKind::Blank => name.dimmed(),
            _ => name.normal(),
        };
        println!("{:>5} {} {}", unit.source_order, name, unit.text.trim_end());
    }

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    format: OutputFormat,
    args: &PipelineArgs,
) -> CliResult<()> {
    fs::create_dir_all(output_dir)?;

    let mut options = args.convert_options()?.with_format(format);
    if args.title.is_none() {
        options.title = None;
    }
    if args.has_tables() {
        let base = options.recover.take().unwrap_or_default();
        options.recover = Some(args.apply_tables(base)?);
    }

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let registry = ConverterRegistry::with_defaults();
    let results = registry.convert_batch_with(inputs, &options, |path, _| {
        pb.set_message(path.display().to_string());
        pb.inc(1);
    });
    pb.finish_with_message("Done!");

    let mut converted = 0;
    for (path, result) in results {
        match result {
            Ok(result) => {
                let stem = path.file_stem().unwrap_or_default().to_string_lossy();
                let target = output_dir.join(format!("{}.{}", stem, format.extension()));
                fs::write(&target, &result.content)?;
                converted += 1;
            }
            Err(e) => eprintln!("{} {}: {}", "Skipped".yellow(), path.display(), e),
        }
    }

    println!(
        "\n{} {} of {} files converted into {}",
        "Done!".green().bold(),
        converted,
        inputs.len(),
        output_dir.display()
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "mdshape".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document structure recovery tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/mdshape".dimmed());
    println!("License: MIT");
}
