use anyhow::Result;
use archetype_mapper::config::RenderArgs;
use archetype_mapper::core::pipeline::{BUNDLE_FILE, INDEX_FILE};
use archetype_mapper::{CliConfig, LocalStorage, RenderEngine, RenderPipeline, TermMapper};
use clap::Parser;
use std::io::Read;
use tempfile::TempDir;

const INDEPENDENT_DOMAINS: &str = "# 12610010 - Independent domains

## Template

Within any domain, the elements and resources of each organization should remain distinct.

## Physical

Independent regions should each keep their own land.

## Social

Independent communities should each keep their own members.
";

const NO_TEMPLATE: &str = "# 12610040 - Regenerative resource cultivation areas

## Physical

Areas of farmland.
";

fn render_args(input: &str, output: &str, extra: &[&str]) -> RenderArgs {
    let mut argv = vec![
        "archetype-mapper",
        "render",
        "--input",
        input,
        "--output",
        output,
    ];
    argv.extend_from_slice(extra);

    match CliConfig::parse_from(argv).command {
        archetype_mapper::config::Command::Render(args) => args,
        other => panic!("expected render command, got {:?}", other),
    }
}

#[tokio::test]
async fn test_render_catalog_directory() -> Result<()> {
    let input_dir = TempDir::new()?;
    let output_dir = TempDir::new()?;
    std::fs::write(input_dir.path().join("12610010.md"), INDEPENDENT_DOMAINS)?;
    std::fs::write(input_dir.path().join("12610040.md"), NO_TEMPLATE)?;
    std::fs::write(input_dir.path().join("README.md"), "Catalog overview")?;
    std::fs::write(input_dir.path().join("notes.txt"), "# 1 - ignored, not markdown")?;

    let input_path = input_dir.path().to_str().unwrap().to_string();
    let output_path = output_dir.path().to_str().unwrap().to_string();
    let args = render_args(&input_path, &output_path, &["--domains", "physical,social", "--bundle"]);

    let pipeline = RenderPipeline::new(
        LocalStorage::new(input_path),
        LocalStorage::new(output_path.clone()),
        args,
        TermMapper::builtin(),
    );
    let summary = RenderEngine::new(pipeline).run().await?;

    assert_eq!(summary.rendered, 2);
    assert_eq!(summary.skipped_no_template, 1);
    assert_eq!(summary.skipped_untitled, 1);
    assert_eq!(summary.output_path, output_path);

    let physical = std::fs::read_to_string(output_dir.path().join("physical/12610010.md"))?;
    assert!(physical.starts_with("# 12610010 - Independent domains (Physical)"));
    assert!(physical.contains(
        "Within any region, the materials and land of each building should remain distinct."
    ));
    assert!(physical.contains("## Catalog Physical Text\n\nIndependent regions should each keep their own land."));
    assert!(physical.trim_end().ends_with("*Rendered from pattern 12610010*"));

    let social = std::fs::read_to_string(output_dir.path().join("social/12610010.md"))?;
    assert!(social.contains(
        "Within any functional domain, the members and social resources of each institution should remain distinct."
    ));

    assert!(!output_dir.path().join("conceptual").exists());

    let index = std::fs::read_to_string(output_dir.path().join(INDEX_FILE))?;
    let lines: Vec<&str> = index.lines().collect();
    assert_eq!(lines[0], "id,name,domain,file");
    assert_eq!(lines.len(), 3);

    let zip_data = std::fs::read(output_dir.path().join(BUNDLE_FILE))?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;
    assert_eq!(archive.len(), 3);

    let mut bundled = String::new();
    archive
        .by_name("social/12610010.md")?
        .read_to_string(&mut bundled)?;
    assert_eq!(bundled, social);

    Ok(())
}

#[tokio::test]
async fn test_render_without_bundle() -> Result<()> {
    let input_dir = TempDir::new()?;
    let output_dir = TempDir::new()?;
    std::fs::write(input_dir.path().join("12610010.md"), INDEPENDENT_DOMAINS)?;

    let input_path = input_dir.path().to_str().unwrap().to_string();
    let output_path = output_dir.path().to_str().unwrap().to_string();
    let args = render_args(&input_path, &output_path, &[]);

    let pipeline = RenderPipeline::new(
        LocalStorage::new(input_path),
        LocalStorage::new(output_path),
        args,
        TermMapper::builtin(),
    );
    let summary = RenderEngine::new(pipeline).run().await?;

    assert_eq!(summary.rendered, 4);
    for domain in ["physical", "social", "conceptual", "psychic"] {
        assert!(output_dir.path().join(domain).join("12610010.md").exists());
    }
    assert!(!output_dir.path().join(BUNDLE_FILE).exists());

    let psychic = std::fs::read_to_string(output_dir.path().join("psychic/12610010.md"))?;
    assert!(psychic.contains("Within any mode of awareness, the perceptions and psychic resources of each structured awareness should remain distinct."));
    assert!(!psychic.contains("## Catalog Psychic Text"));

    Ok(())
}

#[tokio::test]
async fn test_missing_input_directory_is_io_error() {
    let output_dir = TempDir::new().unwrap();
    let output_path = output_dir.path().to_str().unwrap().to_string();
    let missing = output_dir.path().join("does-not-exist");
    let missing = missing.to_str().unwrap().to_string();
    let args = render_args(&missing, &output_path, &[]);

    let pipeline = RenderPipeline::new(
        LocalStorage::new(missing),
        LocalStorage::new(output_path),
        args,
        TermMapper::builtin(),
    );
    let err = RenderEngine::new(pipeline).run().await.unwrap_err();
    assert!(matches!(err, archetype_mapper::MapperError::IoError(_)));
}
