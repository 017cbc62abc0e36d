use std::path::PathBuf;

use clap::Parser;
use slsagen_core::artifact::DigestAlgorithm;
use slsagen_core::config::Overrides;

#[derive(Debug, Parser)]
#[command(
    name = "slsagen",
    version,
    about = "Generate SLSA v1 build provenance for a packaged artifact"
)]
pub struct Args {
    /// Path to the build context descriptor (JSON)
    #[arg(long)]
    pub context: PathBuf,

    /// URI of the trusted build platform
    #[arg(long)]
    pub builder_id: Option<String>,

    /// URI identifying how to interpret the build parameters
    #[arg(long)]
    pub build_type: Option<String>,

    /// Config file path; must exist when given [default: slsagen.toml if present]
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Directory the provenance file is written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Name of the provenance file
    #[arg(long)]
    pub file_name: Option<String>,

    /// Source repository URL, overriding the build context
    #[arg(long, requires = "git_ref")]
    pub repository: Option<String>,

    /// Source ref (branch, tag or commit) for --repository
    #[arg(long = "ref", requires = "repository")]
    pub git_ref: Option<String>,

    /// Commit SHA of the checkout for --repository
    #[arg(long, requires = "repository")]
    pub commit: Option<String>,

    /// Build invocation property, repeatable: -D key=value
    #[arg(short = 'D', long = "define", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,

    /// Digest algorithms for the subject, comma separated
    #[arg(long, value_delimiter = ',', value_parser = parse_digest)]
    pub digest: Option<Vec<DigestAlgorithm>>,

    /// Pretty-print the JSON document
    #[arg(long)]
    pub pretty: bool,

    /// Print the document to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

impl Args {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            builder_id: self.builder_id.clone(),
            build_type: self.build_type.clone(),
            digest_algorithms: self.digest.clone(),
            output_dir: self.output_dir.clone(),
            file_name: self.file_name.clone(),
        }
    }
}

fn parse_property(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{s}`"))?;
    if key.is_empty() {
        return Err(format!("empty property key in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_digest(s: &str) -> Result<DigestAlgorithm, String> {
    s.parse::<DigestAlgorithm>().map_err(|e| e.to_string())
}
