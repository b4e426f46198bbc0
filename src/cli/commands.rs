//! Command implementations

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::app::{AppContainer, PrepareRequest};
use crate::cli::args::{CropArgs, PrepareArgs, ScaleArgs, SpliceArgs, TimecodeArgs};
use crate::cli::{Cli, Commands};
use crate::domain::geometry::{aspect, scale, Crop, Point, Rect};
use crate::domain::model::{JobSpec, JobStatus};
use crate::domain::timeline::{Range, Splice};
use crate::utils::time::format_elapsed;

/// Dispatch the parsed command line
pub async fn run(cli: &Cli, container: &AppContainer) -> Result<()> {
    match &cli.command {
        Commands::Timecode(args) => timecode(args, container, cli.json),
        Commands::Splice(args) => splice(args, cli.json),
        Commands::Crop(args) => crop(args, cli.json),
        Commands::Scale(args) => scale_crop(args, cli.json),
        Commands::Providers => providers(container, cli.json).await,
        Commands::Prepare(args) => prepare(args, container, cli.json).await,
    }
}

#[derive(Serialize)]
struct TimecodeReport {
    range: Range,
    seconds: f64,
    duration: String,
    timecode: String,
}

/// Execute the timecode command
pub fn timecode(args: &TimecodeArgs, container: &AppContainer, json: bool) -> Result<()> {
    let fps = args.fps.unwrap_or(container.config().timecode.fps);
    let range = Range::parse(&args.text, fps)?;
    let report = TimecodeReport {
        range,
        seconds: range.span(),
        duration: format_elapsed(range.span()),
        timecode: range.timecode(fps),
    };

    if json {
        return print_json(&report);
    }
    println!("Range:    {}", report.range.encode());
    println!("Seconds:  {}", report.seconds);
    println!("Duration: {}", report.duration);
    println!("Timecode: {}", report.timecode);
    Ok(())
}

#[derive(Serialize)]
struct SpliceReport {
    splice: Splice,
    segments: usize,
    size: String,
    union: Range,
    sorted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    within: Option<bool>,
}

/// Execute the splice command
pub fn splice(args: &SpliceArgs, json: bool) -> Result<()> {
    let splice = Splice::from_json(&args.splice)?;
    let report = SpliceReport {
        segments: splice.len(),
        size: format_elapsed(splice.size().as_secs_f64()),
        union: splice.union(),
        sorted: splice.is_sorted(),
        within: args.bound.map(|bound| splice.within(bound)),
        splice,
    };

    if json {
        return print_json(&report);
    }
    println!("Splice:   {}", report.splice);
    println!("Segments: {}", report.segments);
    println!("Size:     {}", report.size);
    println!("Union:    {} {}", report.union.encode(), report.union);
    println!("Sorted:   {}", report.sorted);
    if let Some(within) = report.within {
        println!("Within:   {}", within);
    }
    Ok(())
}

#[derive(Serialize)]
struct CropReport {
    source: Rect,
    insets: Crop,
    rect: Rect,
    width: i64,
    height: i64,
}

/// Execute the crop command
pub fn crop(args: &CropArgs, json: bool) -> Result<()> {
    let rect = args.insets.rect(args.source);
    let report = CropReport {
        source: args.source,
        insets: args.insets,
        rect,
        width: rect.width(),
        height: rect.height(),
    };

    if json {
        return print_json(&report);
    }
    println!("Source: {}", report.source);
    println!("Insets: {}", report.insets);
    println!("Rect:   {} ({}x{})", report.rect, report.width, report.height);
    Ok(())
}

#[derive(Serialize)]
struct ScaleReport {
    source: Rect,
    aspect: Point,
    clipped: Rect,
    scaled: Rect,
    insets: Crop,
}

/// Execute the scale command
pub fn scale_crop(args: &ScaleArgs, json: bool) -> Result<()> {
    let source = args.source.canon();
    let scaled = scale(source, args.rect);
    let report = ScaleReport {
        source,
        aspect: aspect(source),
        clipped: args.rect.canon().intersect(source),
        scaled,
        insets: Crop::from_rect(source, scaled),
    };

    if json {
        return print_json(&report);
    }
    println!("Source:  {}", report.source);
    println!("Aspect:  {}:{}", report.aspect.x, report.aspect.y);
    println!("Clipped: {}", report.clipped);
    println!(
        "Scaled:  {} ({}x{})",
        report.scaled,
        report.scaled.width(),
        report.scaled.height()
    );
    println!("Insets:  {}", report.insets);
    Ok(())
}

/// Execute the providers command
pub async fn providers(container: &AppContainer, json: bool) -> Result<()> {
    let config = container.config();
    let registry = container.registry();

    let mut descriptions = Vec::new();
    for name in registry.names() {
        descriptions.push(registry.describe(name, &config).await?);
    }

    if json {
        return print_json(&descriptions);
    }
    for description in &descriptions {
        let health = match (description.health.ok, &description.health.message) {
            (true, _) => "healthy".to_string(),
            (false, Some(message)) => format!("unhealthy: {}", message),
            (false, None) => "unhealthy".to_string(),
        };
        println!(
            "{} [{}] {}",
            description.name,
            if description.enabled { "enabled" } else { "disabled" },
            health
        );
        if description.enabled {
            let caps = &description.capabilities;
            println!("  Inputs:       {}", caps.input_formats.join(", "));
            println!("  Outputs:      {}", caps.output_formats.join(", "));
            println!("  Destinations: {}", caps.destinations.join(", "));
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct PrepareReport {
    job: JobSpec,
    submitted: JobStatus,
    status: JobStatus,
}

/// Execute the prepare command
pub async fn prepare(args: &PrepareArgs, container: &AppContainer, json: bool) -> Result<()> {
    let config = container.config();
    let request = PrepareRequest {
        job_id: args.id.clone(),
        source: args.input.clone(),
        destination: args.output.clone(),
        splice: args.splice.clone(),
        duration: args.duration.clone(),
        crop: args.crop,
        width: args.size.width(),
        height: args.size.height(),
        keep_aspect: args.keep_aspect,
        fps: args.fps.unwrap_or(config.timecode.fps),
    };

    let preparer = container.preparer();
    let job = preparer.prepare(&request).context("Failed to prepare job")?;

    let submission = preparer
        .create(&args.provider, &job)
        .await
        .with_context(|| format!("Failed to create job on {}", args.provider))?;
    let status = submission.provider.status(&job.id).await?;
    let submitted = submission.status;
    info!(job_id = %job.id, state = %status.state, "job submitted");

    let report = PrepareReport {
        job,
        submitted,
        status,
    };
    if json {
        return print_json(&report);
    }

    let job = &report.job;
    let (width, height) = job.output_size();
    println!("Job:         {}", job.id);
    println!("Source:      {}", job.source);
    println!("Destination: {}", job.destination);
    if job.splice.is_empty() {
        println!("Splice:      whole asset");
    } else {
        println!("Splice:      {}", job.splice);
    }
    if let Some(duration) = job.spliced_duration() {
        println!("Duration:    {}", format_elapsed(duration.as_secs_f64()));
    }
    println!("Crop:        {}", job.crop);
    println!("Output:      {} ({}x{})", job.output, width, height);
    println!("Provider:    {}", report.status.provider);
    println!("State:       {}", report.status.state);
    if let Some(message) = &report.submitted.message {
        println!("Message:     {}", message);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report to JSON")?;
    println!("{}", json);
    Ok(())
}
