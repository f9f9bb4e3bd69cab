use crate::http::ReqwestClient;
use crate::output::{FileArgs, OutputArgs};
use crate::prelude::{println, *};
use colored::Colorize;
use std::time::Duration;
use toolbelt_core::net::{extract_video_id, thumbnails, ThumbnailQuality};

pub mod device;
pub mod ip;
pub mod speed;
pub mod youtube;

const TIMEOUT: Duration = Duration::from_secs(20);
const SPEED_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, clap::Parser)]
#[command(name = "net")]
#[command(about = "Public IP, YouTube thumbnails, speed test and device facts")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Your public IP address and its approximate location
    #[clap(name = "ip")]
    Ip(IpOptions),

    /// Download the thumbnail of a YouTube video
    #[clap(name = "youtube")]
    Youtube(YoutubeOptions),

    /// Measure download speed and latency
    #[clap(name = "speed")]
    Speed(SpeedOptions),

    /// Facts about this machine
    #[clap(name = "device")]
    Device(OutputArgs),
}

#[derive(Debug, clap::Args)]
pub struct IpOptions {
    /// Look up this address instead of your own
    pub address: Option<String>,

    /// Only print the address, skip the location lookup
    #[arg(long, conflicts_with = "address")]
    pub plain: bool,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct YoutubeOptions {
    /// Video URL or id
    pub video: String,

    /// maxres, sd, hq, mq or default (slug names like hqdefault work too)
    #[arg(short, long, default_value = "maxresdefault", value_parser = str::parse::<ThumbnailQuality>)]
    pub quality: ThumbnailQuality,

    /// Only list the thumbnail URLs
    #[arg(long)]
    pub list: bool,

    #[clap(flatten)]
    pub file: FileArgs,
}

#[derive(Debug, clap::Args)]
pub struct SpeedOptions {
    /// Latency samples to take before downloading
    #[arg(long, default_value = "5")]
    pub pings: usize,

    #[clap(flatten)]
    pub output: OutputArgs,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("{}", "Network tools talk to third-party services".dimmed());
    }

    match app.command {
        Commands::Ip(options) => {
            let client = ReqwestClient::new(TIMEOUT)?;
            if options.plain {
                let address = ip::public_address(&client).await?;
                return options.output.emit_text(&address);
            }
            let info = ip::lookup(&client, options.address.as_deref()).await?;
            options.output.emit(&info, ip::render)
        }
        Commands::Youtube(options) => {
            let id = extract_video_id(&options.video)?;
            if options.list {
                let mut table = new_table();
                for thumb in thumbnails(&id) {
                    table.add_row(prettytable::row![
                        thumb.quality.slug().bold(),
                        f!("{}x{}", thumb.width, thumb.height),
                        thumb.url
                    ]);
                }
                println!("{table}");
                return Ok(());
            }
            let client = ReqwestClient::new(TIMEOUT)?;
            let (thumb, bytes) = youtube::download(&client, &id, options.quality).await?;
            if thumb.quality != options.quality {
                log::warn!("{} not available, saved {} instead", options.quality.slug(), thumb.quality.slug());
            }
            options.file.write(&thumb.file_name, &bytes)
        }
        Commands::Speed(options) => {
            let client = ReqwestClient::new(SPEED_TIMEOUT)?;
            let report = speed::run(&client, options.pings).await?;
            options.output.emit(&report, speed::render)
        }
        Commands::Device(output) => {
            let info = device::collect(|key| std::env::var(key).ok());
            output.emit(&info, device::render)
        }
    }
}
