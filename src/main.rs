use archetype_mapper::config::{Command, LookupArgs, RenderArgs, TransformArgs, VariationsArgs};
use archetype_mapper::core::catalog::variation_report;
use archetype_mapper::core::Storage;
use archetype_mapper::utils::error::{ErrorSeverity, MapperError};
use archetype_mapper::utils::{logger, validation::Validate};
use archetype_mapper::{
    CliConfig, LocalStorage, PatternDocument, RenderEngine, RenderPipeline, TermMapper,
};
use clap::Parser;
use std::io::Read;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.json_logs);

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let result = match config.build_mapper() {
        Ok(mapper) => run(&config.command, mapper).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(command: &Command, mapper: TermMapper) -> Result<(), MapperError> {
    match command {
        Command::Transform(args) => transform(args, &mapper),
        Command::Lookup(args) => lookup(args, &mapper),
        Command::Table => {
            print!("{}", mapper.vocabulary().to_markdown());
            Ok(())
        }
        Command::Render(args) => render(args, mapper).await,
        Command::Variations(args) => variations(args).await,
    }
}

fn transform(args: &TransformArgs, mapper: &TermMapper) -> Result<(), MapperError> {
    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(file)) => std::fs::read_to_string(file)?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let output = mapper.transform(&text, &args.domain, args.policy.selection_policy())?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn lookup(args: &LookupArgs, mapper: &TermMapper) -> Result<(), MapperError> {
    let phrases = mapper.lookup(&args.domain, &args.term)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(phrases)?);
    } else {
        for (i, phrase) in phrases.iter().enumerate() {
            println!("{}. {}", i, phrase);
        }
    }
    Ok(())
}

async fn render(args: &RenderArgs, mapper: TermMapper) -> Result<(), MapperError> {
    tracing::info!("🚀 Rendering patterns from {} into {}", args.input, args.output);

    let input = LocalStorage::new(args.input.clone());
    let output = LocalStorage::new(args.output.clone());
    let pipeline = RenderPipeline::new(input, output, args.clone(), mapper);

    let summary = RenderEngine::new(pipeline).run().await?;

    tracing::info!("✅ Render completed successfully!");
    println!(
        "✅ Rendered {} patterns ({} skipped without Template, {} skipped without title, {} duplicate ids skipped)",
        summary.rendered,
        summary.skipped_no_template,
        summary.skipped_untitled,
        summary.skipped_duplicate
    );
    println!("📁 Output saved to: {}", summary.output_path);
    Ok(())
}

async fn variations(args: &VariationsArgs) -> Result<(), MapperError> {
    let storage = LocalStorage::new(args.input.clone());
    let files = if args.patterns.is_empty() {
        storage.list_files("md").await?
    } else {
        args.patterns.clone()
    };

    let mut entries = Vec::new();
    for file in files {
        let bytes = storage.read_file(&file).await?;
        let content = String::from_utf8_lossy(&bytes);
        match PatternDocument::parse(&content) {
            Some(document) => entries.push((file, document)),
            None => tracing::warn!("Skipping {}: no '# <id> - <name>' title line", file),
        }
    }
    tracing::info!("Comparing domain sections of {} patterns", entries.len());

    let report = variation_report(&entries);
    match &args.output {
        Some(path) => {
            std::fs::write(path, report)?;
            println!("📁 Variation report saved to: {}", path);
        }
        None => print!("{}", report),
    }
    Ok(())
}
