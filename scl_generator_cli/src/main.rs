use anyhow::{Context, Result};
use clap::Parser;
use sclgenerator::{AttributeSuppliers, GeneratorOptions, ValueMode, generate_xml};
use std::path::{Path, PathBuf};

const DEFAULT_OUTPUT_DIR: &str = "__GENERATED__";

#[derive(Parser, Debug)]
#[command(name = "sclgen")]
#[command(about = "Generate random SCL documents from an XSD schema")]
#[command(long_about = None)]
struct Cli {
    /// Path or HTTP(S) URL of the XSD schema
    #[arg(long, value_name = "PATH_OR_URL")]
    schema: String,

    /// TOML file with generator options
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Name of the root element to generate
    #[arg(long)]
    root: Option<String>,

    /// Constant attribute value, e.g. `SCL.Header#id=Sample`
    #[arg(long = "set", value_name = "SELECTOR=VALUE", value_parser = parse_selector_value)]
    values: Vec<(String, String)>,

    /// Derive attribute values from their simple types instead of a placeholder
    #[arg(long)]
    synthesize: bool,

    #[arg(long, default_value = DEFAULT_OUTPUT_DIR, value_name = "DIR")]
    output_dir: PathBuf,

    /// Print the document instead of writing a file
    #[arg(long)]
    stdout: bool,
}

fn parse_selector_value(value: &str) -> Result<(String, String), String> {
    let (selector, value) = value
        .split_once('=')
        .ok_or_else(|| format!("expected SELECTOR=VALUE, got `{value}`"))?;
    if !selector.contains('#') {
        return Err(format!(
            "selector `{selector}` must have the form <path>#<attribute>"
        ));
    }

    Ok((selector.to_string(), value.to_string()))
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn fetch_schema(source: &str) -> Result<String> {
    if !is_url(source) {
        return tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("Failed to read schema file: {source}"));
    }

    let response = reqwest::get(source)
        .await
        .with_context(|| format!("Failed to fetch URL: {source}"))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("HTTP request failed with status {status} for URL: {source}");
    }

    let text = response
        .text()
        .await
        .with_context(|| format!("Failed to read response body from: {source}"))?;

    tracing::debug!("Fetched {} bytes from: {}", text.len(), source);
    Ok(text)
}

fn build_options(cli: &Cli) -> Result<GeneratorOptions> {
    let mut options = match &cli.config {
        Some(path) => GeneratorOptions::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GeneratorOptions::default(),
    };

    if let Some(root) = &cli.root {
        options = options.with_root_element(root);
    }
    if cli.synthesize {
        options = options.with_value_mode(ValueMode::Synthesized);
    }
    for (selector, value) in cli.values.iter() {
        options = options.with_attribute_value(selector, value);
    }

    Ok(options)
}

fn default_suppliers() -> AttributeSuppliers {
    AttributeSuppliers::new().with("SCL.Private#type", |_| "PRIVATE_TYPE".to_string())
}

fn output_path(directory: &Path) -> PathBuf {
    let millis = chrono::Utc::now().timestamp_millis();
    directory.join(format!("{millis}__generated.scl"))
}

async fn write_output(directory: &Path, document: &str) -> Result<PathBuf> {
    tokio::fs::create_dir_all(directory)
        .await
        .with_context(|| format!("Failed to create directory: {}", directory.display()))?;

    let path = output_path(directory);
    tokio::fs::write(&path, document)
        .await
        .with_context(|| format!("Failed to write: {}", path.display()))?;

    Ok(path)
}

async fn run(cli: Cli) -> Result<()> {
    let options = build_options(&cli)?;
    let xsd = fetch_schema(&cli.schema).await?;

    let document = generate_xml(&xsd, &options, default_suppliers())
        .with_context(|| format!("Failed to generate {} document", options.root_element))?;

    if cli.stdout {
        println!("{document}");
        return Ok(());
    }

    let path = write_output(&cli.output_dir, &document).await?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
          <xs:element name="SCL">
            <xs:complexType>
              <xs:sequence>
                <xs:element name="Private" minOccurs="1" maxOccurs="1">
                  <xs:complexType>
                    <xs:attribute name="type" use="required"/>
                  </xs:complexType>
                </xs:element>
              </xs:sequence>
              <xs:attribute name="version" use="required" fixed="2007"/>
            </xs:complexType>
          </xs:element>
        </xs:schema>"#;

    #[test]
    fn test_parse_selector_value() {
        assert_eq!(
            parse_selector_value("SCL.Header#id=A=B").unwrap(),
            ("SCL.Header#id".to_string(), "A=B".to_string())
        );
        assert!(parse_selector_value("SCL.Header#id").is_err());
        assert!(parse_selector_value("SCL.Header=id").is_err());
    }

    #[test]
    fn test_build_options() {
        let cli = Cli::parse_from([
            "sclgen",
            "--schema",
            "SCL.xsd",
            "--root",
            "Substation",
            "--set",
            "Substation#name=S1",
            "--synthesize",
        ]);
        let options = build_options(&cli).unwrap();

        assert_eq!(options.root_element, "Substation");
        assert_eq!(options.value_mode, ValueMode::Synthesized);
        assert_eq!(
            options.attribute_values.get("Substation#name").map(String::as_str),
            Some("S1")
        );
        assert_eq!(cli.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_missing_config() {
        let cli = Cli::parse_from(["sclgen", "--schema", "SCL.xsd", "--config", "missing.toml"]);
        assert!(build_options(&cli).is_err());
    }

    #[tokio::test]
    async fn test_run_writes_document() {
        let directory = tempfile::tempdir().unwrap();
        let schema_path = directory.path().join("SCL.xsd");
        std::fs::write(&schema_path, SCHEMA).unwrap();
        let output_dir = directory.path().join("out");

        let cli = Cli::parse_from([
            "sclgen",
            "--schema",
            schema_path.to_str().unwrap(),
            "--output-dir",
            output_dir.to_str().unwrap(),
        ]);
        run(cli).await.unwrap();

        let files: Vec<_> = std::fs::read_dir(&output_dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);
        let name = files[0].file_name().unwrap().to_str().unwrap().to_string();
        assert!(name.ends_with("__generated.scl"));

        let document = std::fs::read_to_string(&files[0]).unwrap();
        assert!(document.contains("version=\"2007\""));
        assert!(document.contains("type=\"PRIVATE_TYPE\""));
    }

    #[tokio::test]
    async fn test_run_fails_without_root() {
        let directory = tempfile::tempdir().unwrap();
        let schema_path = directory.path().join("SCL.xsd");
        std::fs::write(&schema_path, SCHEMA).unwrap();
        let output_dir = directory.path().join("out");

        let cli = Cli::parse_from([
            "sclgen",
            "--schema",
            schema_path.to_str().unwrap(),
            "--root",
            "Substation",
            "--output-dir",
            output_dir.to_str().unwrap(),
        ]);

        assert!(run(cli).await.is_err());
        assert!(!output_dir.exists());
    }
}
