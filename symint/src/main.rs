use clap::Parser as ClapParser;
use std::process;

use symint::{ShapeEnv, SymInt, floor_div};

#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Spatial size of the convolution input
    #[arg(long, default_value_t = 32)]
    input: i64,

    #[arg(long, default_value_t = 3)]
    kernel: i64,

    #[arg(long, default_value_t = 1)]
    stride: i64,

    #[arg(long, default_value_t = 0)]
    padding: i64,

    #[arg(long, default_value_t = 1)]
    dilation: i64,

    /// Trace the input size as a symbol hinted with `--input`
    #[arg(long, help = "Make the input size symbolic")]
    symbolic: bool,

    /// Trace the input size as a symbol without a hint
    #[arg(long, conflicts_with = "symbolic", help = "Make the input size unbacked")]
    unbacked: bool,
}

/// Convolution constants, each small enough to be a concrete `SymInt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Conv {
    padding: i64,
    reach: i64,
    stride: i64,
}

fn fits(value: i64) -> Option<i64> {
    SymInt::check_range(value).then_some(value)
}

impl Conv {
    fn from_cli(cli: &Cli) -> Result<Self, String> {
        if cli.stride == 0 {
            return Err("stride must not be zero".into());
        }
        let padding = cli
            .padding
            .checked_mul(2)
            .and_then(fits)
            .ok_or_else(|| format!("padding {} is out of range", cli.padding))?;
        let reach = cli
            .kernel
            .checked_sub(1)
            .and_then(|k| cli.dilation.checked_mul(k))
            .and_then(|r| r.checked_add(1))
            .and_then(fits)
            .ok_or_else(|| {
                format!(
                    "kernel {} with dilation {} is out of range",
                    cli.kernel, cli.dilation
                )
            })?;
        let stride =
            fits(cli.stride).ok_or_else(|| format!("stride {} is out of range", cli.stride))?;
        Ok(Self {
            padding,
            reach,
            stride,
        })
    }

    /// `(in + 2p - d(k - 1) - 1) // s + 1`
    fn output_size(&self, input: &SymInt) -> SymInt {
        (input + SymInt::new(self.padding) - SymInt::new(self.reach)) / SymInt::new(self.stride)
            + SymInt::new(1)
    }

    /// `output_size` on a plain integer; `None` if any step leaves the
    /// concrete range.
    fn checked_output_size(&self, input: i64) -> Option<i64> {
        let padded = fits(input)?.checked_add(self.padding).and_then(fits)?;
        let span = padded.checked_sub(self.reach).and_then(fits)?;
        let steps = fits(floor_div(span, self.stride))?;
        steps.checked_add(1).and_then(fits)
    }
}

fn validate(cli: &Cli) -> Result<Conv, String> {
    let conv = Conv::from_cli(cli)?;
    if !cli.unbacked && conv.checked_output_size(cli.input).is_none() {
        return Err(format!("input {} is out of range", cli.input));
    }
    Ok(conv)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let conv = match validate(&cli) {
        Ok(conv) => conv,
        Err(msg) => {
            eprintln!("Error: {msg}");
            process::exit(1);
        }
    };

    let env = ShapeEnv::new();
    let input = if cli.unbacked {
        env.create_unbacked_symbol()
    } else if cli.symbolic {
        env.create_symbol(cli.input)
    } else {
        SymInt::new(cli.input)
    };

    let output = conv.output_size(&input);
    println!("input:  {input}");
    println!("output: {output}");

    match output.guard_int() {
        Ok(value) => println!("value:  {value}"),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }

    for guard in env.guards() {
        println!("guard:  {} == {} ({}:{})", guard.expr, guard.value, guard.file, guard.line);
    }
}
