//! Command-line interface for building a photomosaic from a target and a tile directory

use crate::algorithm::compositor::MosaicCompositor;
use crate::color::TransferMode;
use crate::io::configuration::{
    DEFAULT_ENLARGEMENT, DEFAULT_OUTPUT, DEFAULT_SEED, DEFAULT_TILE_SIZE,
};
use crate::io::error::{MosaicError, Result, invalid_input};
use crate::io::image::{load_target, load_tiles, save_mosaic};
use crate::io::progress::ProgressManager;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "mosaictile")]
#[command(
    author,
    version,
    about = "Random-assign photomosaic with per-cell color matching"
)]
/// Command-line arguments for the mosaic builder
pub struct Cli {
    /// Target image to reproduce
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Directory of tile images (scanned recursively)
    #[arg(value_name = "TILES")]
    pub tiles: PathBuf,

    /// Tile edge length in output pixels
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,

    /// Scale factor applied to the target before tiling
    #[arg(short, long, default_value_t = DEFAULT_ENLARGEMENT)]
    pub enlargement: u32,

    /// Color matching mode
    #[arg(short, long, value_enum, default_value_t = TransferMode::MeanStd)]
    pub mode: TransferMode,

    /// Random seed for the balanced tile assignment
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output image path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub out: PathBuf,

    /// Worker threads used for composition (defaults to one per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Reject parameters that cannot produce a mosaic
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the tile size, enlargement or thread count is zero
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            return Err(invalid_input(
                "tile_size",
                &self.tile_size,
                &"must be positive",
            ));
        }
        if self.enlargement == 0 {
            return Err(invalid_input(
                "enlargement",
                &self.enlargement,
                &"must be positive",
            ));
        }
        if self.threads == Some(0) {
            return Err(invalid_input("threads", &0, &"must be positive"));
        }
        Ok(())
    }
}

/// Runs one mosaic build described by the command line
pub struct MosaicJob {
    cli: Cli,
    progress_manager: ProgressManager,
}

impl MosaicJob {
    /// Create a job for the given arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = if cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };

        Self {
            cli,
            progress_manager,
        }
    }

    /// Arguments this job was created with
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Load inputs, build the mosaic and write it to the output path
    ///
    /// # Errors
    ///
    /// Returns an error if validation, loading, composition or saving fails
    pub fn run(&mut self) -> Result<()> {
        self.cli.validate()?;
        let start_time = Instant::now();
        let tile_size = self.cli.tile_size;

        let target = load_target(&self.cli.image, self.cli.enlargement, tile_size)?;

        self.progress_manager.start_loading();
        let progress = &self.progress_manager;
        let tiles = load_tiles(&self.cli.tiles, tile_size, |count| {
            progress.tiles_loaded(count);
        })?;
        self.progress_manager.finish_loading(tiles.len());

        let compositor =
            MosaicCompositor::new(&target, tile_size as usize, &tiles, self.cli.mode)?;
        self.progress_manager
            .start_cells(compositor.geometry().cell_count());

        let mosaic = self.with_thread_pool(|| {
            compositor.build_observed(self.cli.seed, &self.progress_manager)
        })?;
        self.progress_manager.finish();

        let (width, height) = (mosaic.width(), mosaic.height());
        save_mosaic(mosaic, &self.cli.out)?;
        info!(
            "Finished. Wrote {} ({width}x{height}) in {:.2?}",
            self.cli.out.display(),
            start_time.elapsed()
        );

        Ok(())
    }

    fn with_thread_pool<T: Send>(&self, work: impl FnOnce() -> Result<T> + Send) -> Result<T> {
        match self.cli.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| MosaicError::Computation {
                        operation: "thread pool creation",
                        reason: e.to_string(),
                    })?;
                pool.install(work)
            }
            None => work(),
        }
    }
}
