use clap::Parser;
use notes_ai::client::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use std::path::{Path, PathBuf};

/// Generate speaker notes for a PDF or PowerPoint deck and export them as
/// a new PowerPoint file.
#[derive(Parser, Debug)]
#[command(name = "slide-notes")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input presentation (.pdf or .pptx)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output file name (default: <input>_with_notes.pptx)
    #[arg(short = 'n', long)]
    pub output_name: Option<String>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Gemini API endpoint
    #[arg(long, env = "GEMINI_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Width of rendered PDF page previews in pixels
    #[arg(long, default_value = "1280")]
    pub width: u32,

    /// JPEG quality of page previews (1-100)
    #[arg(long, default_value = "80", value_parser = clap::value_parser!(u8).range(1..=100))]
    pub jpeg_quality: u8,

    /// Directory containing the pdfium shared library
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pub pdfium_lib: Option<PathBuf>,

    /// Export right after generation instead of opening the review prompt
    #[arg(long)]
    pub no_review: bool,

    /// Print slide text and notes to stdout
    #[arg(short, long)]
    pub print: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Directory the deck is exported to.
    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => parent_dir(&self.input),
        }
    }
}

/// Parent directory of `path`, or the current directory.
pub fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
