//! Command-line interface for solving single problems, batches, and image pairs

use crate::algorithm::pipeline::{Recovery, recover_kernel};
use crate::algorithm::problem::{KernelShape, Problem};
use crate::algorithm::solver::SolverConfig;
use crate::algorithm::synthesis::{SynthesisConfig, synthesize};
use crate::io::configuration::{
    DEFAULT_SEED, DEFAULT_SYNTH_COLS, DEFAULT_SYNTH_ROWS, OUTPUT_SUFFIX, PROBLEM_EXTENSION,
};
use crate::io::error::{KernelError, Result, WithPath, invalid_parameter, invalid_target};
use crate::io::image::load_image_pair;
use crate::io::progress::ProgressManager;
use crate::io::protocol::{format_matrix, format_problem, parse_problem};
use clap::{ArgAction, Parser};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "kernelfit")]
#[command(
    author,
    version,
    about = "Recover a convolution kernel from an image and its filtered output"
)]
/// Command-line arguments for the kernel recovery tool
pub struct Cli {
    /// Problem file or directory of problem files (reads stdin when omitted)
    #[arg(value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Relative cutoff for small singular values
    #[arg(long, value_name = "RCOND")]
    pub rcond: Option<f64>,

    /// Kernel shape for image-pair recovery and synthesis
    #[arg(short, long, value_name = "HxW", value_parser = parse_kernel_shape)]
    pub kernel: Option<KernelShape>,

    /// Input image for image-pair recovery
    #[arg(
        long,
        value_name = "IMAGE",
        requires_all = ["output_image", "kernel"],
        conflicts_with = "target"
    )]
    pub input_image: Option<PathBuf>,

    /// Filtered image for image-pair recovery
    #[arg(long, value_name = "IMAGE", requires = "input_image")]
    pub output_image: Option<PathBuf>,

    /// Write a random problem with a known kernel to this path
    #[arg(
        long,
        value_name = "PATH",
        requires = "kernel",
        conflicts_with_all = ["target", "input_image"]
    )]
    pub synthesize: Option<PathBuf>,

    /// Image height for synthesized problems
    #[arg(long, default_value_t = DEFAULT_SYNTH_ROWS)]
    pub rows: usize,

    /// Image width for synthesized problems
    #[arg(long, default_value_t = DEFAULT_SYNTH_COLS)]
    pub cols: usize,

    /// Random seed for reproducible synthesis
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Suppress progress output and non-error logs
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_kernel_shape(s: &str) -> std::result::Result<KernelShape, String> {
    s.parse::<KernelShape>().map_err(|e| e.to_string())
}

/// What a parsed command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Read one problem from stdin and write the kernel to stdout
    Stdin,
    /// Solve a problem file or every problem file in a directory
    Batch(PathBuf),
    /// Recover a kernel from two images
    ImagePair {
        /// Unfiltered image
        input: PathBuf,
        /// Filtered image
        output: PathBuf,
        /// Kernel shape to recover
        kernel: KernelShape,
    },
    /// Write a random problem
    Synthesize {
        /// Destination of the problem text
        path: PathBuf,
        /// Shape of the hidden kernel
        kernel: KernelShape,
    },
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Solver settings requested on the command line
    pub const fn solver_config(&self) -> SolverConfig {
        SolverConfig { rcond: self.rcond }
    }

    /// Resolve the operating mode from the parsed flags
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a mode is missing its kernel shape
    pub fn mode(&self) -> Result<Mode> {
        let require_kernel = || {
            self.kernel.ok_or_else(|| {
                invalid_parameter("kernel", &"", &"a kernel shape is required")
            })
        };

        if let Some(path) = &self.synthesize {
            return Ok(Mode::Synthesize {
                path: path.clone(),
                kernel: require_kernel()?,
            });
        }
        if let (Some(input), Some(output)) = (&self.input_image, &self.output_image) {
            return Ok(Mode::ImagePair {
                input: input.clone(),
                output: output.clone(),
                kernel: require_kernel()?,
            });
        }
        Ok(self
            .target
            .as_ref()
            .map_or(Mode::Stdin, |target| Mode::Batch(target.clone())))
    }
}

/// Dispatches a parsed command line to the recovery pipeline
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run against the process's stdin and stdout
    ///
    /// # Errors
    ///
    /// Returns an error if reading, parsing, solving or writing fails
    pub fn process(&mut self) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.process_with(stdin.lock(), &mut stdout.lock())
    }

    /// Run with explicit input and output streams
    ///
    /// Only stdin mode reads from `input`; kernels printed by stdin and
    /// image-pair modes, and the ground truth printed by synthesis, go to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading, parsing, solving or writing fails. Batch
    /// mode stops at the first failing file.
    pub fn process_with<R: Read, W: Write>(&mut self, mut input: R, output: &mut W) -> Result<()> {
        let config = self.cli.solver_config();
        config.validate()?;

        match self.cli.mode()? {
            Mode::Stdin => {
                let mut text = String::new();
                input.read_to_string(&mut text).with_path("<stdin>", "read")?;
                let recovery = solve_problem(&parse_problem(&text)?, &config)?;
                write_kernel(output, &recovery)
            }
            Mode::Batch(target) => self.process_batch(&target, &config),
            Mode::ImagePair {
                input: input_path,
                output: output_path,
                kernel,
            } => {
                let problem = load_image_pair(&input_path, &output_path, kernel)?;
                let recovery = solve_problem(&problem, &config)?;
                write_kernel(output, &recovery)
            }
            Mode::Synthesize { path, kernel } => {
                let synth_config = SynthesisConfig {
                    rows: self.cli.rows,
                    cols: self.cli.cols,
                    ..SynthesisConfig::with_kernel(kernel)
                };
                let synthetic = synthesize(&synth_config, self.cli.seed)?;
                std::fs::write(&path, format_problem(&synthetic.problem))
                    .with_path(&path, "write problem")?;
                info!(path = %path.display(), seed = self.cli.seed, "synthesized problem");
                output
                    .write_all(format_matrix(&synthetic.kernel).as_bytes())
                    .with_path("<stdout>", "write")
            }
        }
    }

    fn process_batch(&mut self, target: &Path, config: &SolverConfig) -> Result<()> {
        let files = self.collect_files(target)?;

        if files.is_empty() {
            warn!(target = %target.display(), "no problem files to process");
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            if let Some(ref pm) = self.progress_manager {
                pm.start_file(file);
            }

            Self::process_file(file, config)?;

            if let Some(ref mut pm) = self.progress_manager {
                pm.complete_file();
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self, target: &Path) -> Result<Vec<PathBuf>> {
        if target.is_file() {
            if !Self::is_problem_file(target) {
                return Err(invalid_target(target, &"file must be a .txt problem file"));
            }
            Ok(if self.should_process_file(target) {
                vec![target.to_path_buf()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target, "read directory")? {
                let path = entry.with_path(target, "read directory")?.path();
                if Self::is_problem_file(&path)
                    && !Self::is_output_file(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_target(target, &"must be a problem file or directory"))
        }
    }

    fn is_problem_file(path: &Path) -> bool {
        path.extension().and_then(|s| s.to_str()) == Some(PROBLEM_EXTENSION)
    }

    fn is_output_file(path: &Path) -> bool {
        path.file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            info!(path = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(input_path: &Path, config: &SolverConfig) -> Result<()> {
        let text = std::fs::read_to_string(input_path).with_path(input_path, "read problem")?;
        let problem = parse_problem(&text)?;
        let recovery = solve_problem(&problem, config)?;

        let output_path = Self::get_output_path(input_path);
        std::fs::write(&output_path, format_matrix(&recovery.kernel))
            .with_path(&output_path, "write kernel")?;

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            rank = recovery.rank,
            "kernel written"
        );
        Ok(())
    }

    /// Output path for a problem file: `<stem>_kernel.txt` in the same directory
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            PROBLEM_EXTENSION
        );

        input_path
            .parent()
            .map_or_else(|| PathBuf::from(&output_name), |parent| parent.join(&output_name))
    }
}

fn solve_problem(problem: &Problem, config: &SolverConfig) -> Result<Recovery> {
    let recovery = recover_kernel(problem, config)?;
    if !recovery.is_exact() {
        warn!(
            max_abs_residual = recovery.max_abs_residual,
            "rounded kernel does not reproduce the observed output exactly"
        );
    }
    Ok(recovery)
}

fn write_kernel<W: Write>(output: &mut W, recovery: &Recovery) -> Result<()> {
    output
        .write_all(format_matrix(&recovery.kernel).as_bytes())
        .and_then(|()| output.flush())
        .map_err(|source| KernelError::FileSystem {
            path: PathBuf::from("<stdout>"),
            operation: "write kernel",
            source,
        })
}
