//! phaseform - Inspect the waveform generators from the terminal
//!
//! Run with: cargo run -- list

mod spectrum;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{ensure, Result};
use phaseform::{
    list_generators, EvalConfig, GraphNode, OscNode, RenderCtx, Waveform, WidthPolicy,
    MAX_BLOCK_SIZE,
};
use spectrum::HarmonicAnalyzer;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "phaseform")]
#[command(about = "Phase-shaping oscillator toolbox")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every generator and the parameters it reads
    List,

    /// Print one cycle as `phase,value` CSV
    Dump {
        #[command(flatten)]
        shape: ShapeArgs,

        /// Samples per cycle
        #[arg(short, long, default_value_t = 64)]
        points: usize,
    },

    /// Print the harmonic amplitudes of one cycle
    Spectrum {
        #[command(flatten)]
        shape: ShapeArgs,

        /// FFT size (samples per cycle)
        #[arg(short, long, default_value_t = 1024)]
        size: usize,

        /// Number of harmonics to report
        #[arg(long, default_value_t = 16)]
        harmonics: usize,
    },
}

#[derive(Args)]
struct ShapeArgs {
    /// Generator name, e.g. pd_res2
    waveform: Waveform,

    /// Shape width in (0, 1)
    #[arg(short, long, default_value_t = OscNode::DEFAULT_WIDTH)]
    width: f32,

    /// Tone (defaults per family)
    #[arg(short, long)]
    tone: Option<f32>,

    /// Fundamental in Hz, used by the Moog model
    #[arg(short, long, default_value_t = 440.0)]
    freq: f32,

    /// Clamp width into range instead of rejecting it
    #[arg(long)]
    clamp_width: bool,
}

impl ShapeArgs {
    /// Render exactly one cycle of `points` samples.
    ///
    /// Stateful generators run one cycle first so the highpass has settled.
    fn render_cycle(&self, points: usize) -> Result<Vec<f32>> {
        ensure!(points >= 2, "need at least 2 points per cycle, got {points}");
        ensure!(self.freq > 0.0, "frequency must be positive, got {}", self.freq);

        let mut config = EvalConfig::default();
        if self.clamp_width {
            config = config.with_width_policy(WidthPolicy::clamp());
        }

        let mut osc = OscNode::new(self.waveform).with_config(config)?;
        osc.set_width(self.width)?;
        if let Some(tone) = self.tone {
            osc.set_tone(tone)?;
        }

        let ctx = RenderCtx::from_freq(self.freq * points as f32, self.freq);
        let mut cycle = vec![0.0f32; points];
        if self.waveform.is_stateful() {
            render_chunked(&mut osc, &mut cycle, &ctx);
            osc.sync();
        }
        render_chunked(&mut osc, &mut cycle, &ctx);

        tracing::debug!(
            waveform = %self.waveform,
            width = osc.width(),
            tone = osc.tone(),
            points,
            "rendered cycle"
        );
        Ok(cycle)
    }
}

fn render_chunked(osc: &mut OscNode, out: &mut [f32], ctx: &RenderCtx) {
    for block in out.chunks_mut(MAX_BLOCK_SIZE) {
        osc.render_block(block, ctx);
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            for (name, params) in list_generators() {
                let params: Vec<String> = params.iter().map(ToString::to_string).collect();
                println!("{name:<16}{}", params.join(", "));
            }
        }
        Commands::Dump { shape, points } => {
            let cycle = shape.render_cycle(points)?;
            println!("phase,value");
            for (i, value) in cycle.iter().enumerate() {
                println!("{},{value}", i as f32 / points as f32);
            }
        }
        Commands::Spectrum {
            shape,
            size,
            harmonics,
        } => {
            let cycle = shape.render_cycle(size)?;
            let mut analyzer = HarmonicAnalyzer::new(size);
            println!("{:>8}  {:>10}  {:>8}", "harmonic", "amplitude", "dB");
            for h in analyzer.analyze(&cycle, harmonics) {
                println!("{:>8}  {:>10.6}  {:>8.2}", h.number, h.amplitude, h.db);
            }
        }
    }

    Ok(())
}
