mod config;
mod logging;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use config::AppConfig;
use lite_booth_adapters::{
    load_recipe, present_crop, present_export, present_preset_row, present_presets_json,
    CpuFilterRenderer, PngExporter, StillImageSource, SystemClock, TestPatternSource,
};
use lite_booth_application::{
    ApplicationError, ApplicationService, ApplyFiltersCommand, ApplyPresetCommand, CaptureCommand,
    ExportCommand, FrameSource, SessionSettings, SetAspectRatioCommand, StartCameraCommand,
};
use lite_booth_domain::{crop_rect, find_preset, AspectRatio, PRESETS};

fn main() -> ExitCode {
    logging::init_logging();
    let args: Vec<String> = std::env::args().collect();
    let config = AppConfig::from_env();

    let command = parse_command(&args);
    match run_command(command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            print_usage();
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn build_application_service(
    camera: Box<dyn FrameSource>,
    settings: SessionSettings,
) -> ApplicationService {
    ApplicationService::new(
        camera,
        Box::new(CpuFilterRenderer),
        Box::new(PngExporter),
        Box::new(SystemClock),
        settings,
    )
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Ui {
        image: Option<PathBuf>,
    },
    Presets {
        json: bool,
    },
    Style {
        preset: String,
    },
    Crop {
        width: u32,
        height: u32,
        ratio: AspectRatio,
    },
    Export {
        input: PathBuf,
        output: PathBuf,
        preset: Option<String>,
        ratio: AspectRatio,
        recipe: Option<PathBuf>,
    },
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

impl From<ApplicationError> for CommandError {
    fn from(error: ApplicationError) -> Self {
        match error {
            ApplicationError::InvalidInput(msg) => Self::Usage(msg),
            other => Self::Runtime(other.to_string()),
        }
    }
}

fn parse_command(args: &[String]) -> Result<Command, CommandError> {
    if args.len() <= 1 {
        return Ok(Command::Ui { image: None });
    }

    match args[1].as_str() {
        "ui" => Ok(Command::Ui {
            image: args.get(2).map(PathBuf::from),
        }),
        "presets" => match args.get(2).map(String::as_str) {
            None => Ok(Command::Presets { json: false }),
            Some("--json") => Ok(Command::Presets { json: true }),
            Some(other) => Err(CommandError::Usage(format!("unknown option: {other}"))),
        },
        "style" => {
            let preset = args
                .get(2)
                .ok_or_else(|| CommandError::Usage("missing preset name".to_string()))?;
            Ok(Command::Style {
                preset: preset.clone(),
            })
        }
        "crop" => {
            if args.len() < 5 {
                return Err(CommandError::Usage(
                    "crop needs <width> <height> <ratio>".to_string(),
                ));
            }
            Ok(Command::Crop {
                width: parse_dimension(&args[2])?,
                height: parse_dimension(&args[3])?,
                ratio: parse_ratio(&args[4])?,
            })
        }
        "export" => parse_export(&args[2..]),
        other => Err(CommandError::Usage(format!("unknown command: {other}"))),
    }
}

fn parse_export(args: &[String]) -> Result<Command, CommandError> {
    let mut positional = Vec::new();
    let mut preset = None;
    let mut ratio = AspectRatio::Original;
    let mut recipe = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value_for = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| CommandError::Usage(format!("missing value for {flag}")))
        };
        match arg.as_str() {
            "--preset" => preset = Some(value_for("--preset")?),
            "--ratio" => ratio = parse_ratio(&value_for("--ratio")?)?,
            "--recipe" => recipe = Some(PathBuf::from(value_for("--recipe")?)),
            flag if flag.starts_with("--") => {
                return Err(CommandError::Usage(format!("unknown option: {flag}")))
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    if preset.is_some() && recipe.is_some() {
        return Err(CommandError::Usage(
            "--preset and --recipe cannot be combined".to_string(),
        ));
    }
    let mut positional = positional.into_iter();
    match (positional.next(), positional.next(), positional.next()) {
        (Some(input), Some(output), None) => Ok(Command::Export {
            input,
            output,
            preset,
            ratio,
            recipe,
        }),
        (_, _, Some(extra)) => Err(CommandError::Usage(format!(
            "unexpected argument: {}",
            extra.display()
        ))),
        _ => Err(CommandError::Usage(
            "export needs <input> <output>".to_string(),
        )),
    }
}

fn parse_dimension(raw: &str) -> Result<u32, CommandError> {
    raw.parse::<u32>()
        .map_err(|_| CommandError::Usage(format!("invalid dimension: {raw}")))
}

fn parse_ratio(raw: &str) -> Result<AspectRatio, CommandError> {
    raw.parse::<AspectRatio>()
        .map_err(|error| CommandError::Usage(error.to_string()))
}

fn run_command(
    command: Result<Command, CommandError>,
    config: &AppConfig,
) -> Result<(), CommandError> {
    match command? {
        Command::Ui { image } => {
            let camera: Box<dyn FrameSource> = match image {
                Some(path) => Box::new(StillImageSource::new(path)),
                None => Box::new(TestPatternSource::new(
                    config.test_pattern_width,
                    config.test_pattern_height,
                )),
            };
            let mut service = build_application_service(camera, config.session_settings());
            ui::launch_window(&mut service, config).map_err(CommandError::Runtime)
        }
        Command::Presets { json } => {
            if json {
                println!("{}", present_presets_json(&PRESETS)?);
            } else {
                for preset in PRESETS.iter() {
                    println!("{}", present_preset_row(preset));
                }
            }
            Ok(())
        }
        Command::Style { preset } => {
            let preset =
                find_preset(&preset).map_err(|error| CommandError::Usage(error.to_string()))?;
            println!("{}", preset.filters.style_string());
            Ok(())
        }
        Command::Crop {
            width,
            height,
            ratio,
        } => {
            let rect = crop_rect(width, height, ratio)
                .map_err(|error| CommandError::Usage(error.to_string()))?;
            println!("{}", present_crop(width, height, ratio, &rect));
            Ok(())
        }
        Command::Export {
            input,
            output,
            preset,
            ratio,
            recipe,
        } => {
            // Files are exported as-is; mirroring only applies to a live feed.
            let settings = SessionSettings {
                mirror: false,
                ..config.session_settings()
            };
            let mut service =
                build_application_service(Box::new(StillImageSource::new(input)), settings);
            service
                .start_camera(StartCameraCommand)
                .map_err(|error| CommandError::Runtime(format!("open failed: {error}")))?;
            service
                .capture(CaptureCommand)
                .map_err(|error| CommandError::Runtime(format!("capture failed: {error}")))?;

            if let Some(name) = preset {
                service
                    .apply_preset(ApplyPresetCommand { name })
                    .map_err(|error| CommandError::Usage(error.to_string()))?;
            }
            if let Some(path) = recipe {
                let filters = load_recipe(&path)?;
                service.apply_filters(ApplyFiltersCommand { filters })?;
            }
            service.set_aspect_ratio(SetAspectRatioCommand { ratio });

            let artifact = service
                .export(ExportCommand { file_path: output })
                .map_err(|error| CommandError::Runtime(format!("export failed: {error}")))?;
            println!("{}", present_export(&artifact));
            Ok(())
        }
    }
}

fn print_usage() {
    println!("usage:");
    println!("  lite-booth ui [image]");
    println!("  lite-booth presets [--json]");
    println!("  lite-booth style <preset>");
    println!("  lite-booth crop <width> <height> <original|1:1|9:16|16:9>");
    println!(
        "  lite-booth export <input> <output.png> [--preset NAME] [--ratio R] [--recipe FILE]"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("lite-booth")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn no_arguments_opens_the_window() {
        let command = parse_command(&args(&[])).expect("ui should parse");
        assert_eq!(command, Command::Ui { image: None });
    }

    #[test]
    fn parse_crop_command() {
        let command = parse_command(&args(&["crop", "1920", "1080", "1:1"])).expect("crop");
        assert_eq!(
            command,
            Command::Crop {
                width: 1920,
                height: 1080,
                ratio: AspectRatio::Square,
            }
        );
    }

    #[test]
    fn parse_crop_rejects_bad_ratio() {
        let command = parse_command(&args(&["crop", "10", "10", "4:3"]));
        assert!(matches!(command, Err(CommandError::Usage(_))));
    }

    #[test]
    fn parse_export_with_flags() {
        let command = parse_command(&args(&[
            "export",
            "in.jpg",
            "--ratio",
            "9:16",
            "out.png",
            "--preset",
            "noir",
        ]))
        .expect("export");
        assert_eq!(
            command,
            Command::Export {
                input: PathBuf::from("in.jpg"),
                output: PathBuf::from("out.png"),
                preset: Some("noir".to_string()),
                ratio: AspectRatio::Portrait,
                recipe: None,
            }
        );
    }

    #[test]
    fn parse_export_rejects_preset_with_recipe() {
        let command = parse_command(&args(&[
            "export", "in.jpg", "out.png", "--preset", "Noir", "--recipe", "r.json",
        ]));
        assert!(matches!(command, Err(CommandError::Usage(_))));
    }

    #[test]
    fn parse_export_requires_two_paths() {
        assert!(matches!(
            parse_command(&args(&["export", "in.jpg"])),
            Err(CommandError::Usage(_))
        ));
        assert!(matches!(
            parse_command(&args(&["export", "in.jpg", "out.png", "--ratio"])),
            Err(CommandError::Usage(_))
        ));
    }

    #[test]
    fn parse_presets_json_flag() {
        assert_eq!(
            parse_command(&args(&["presets", "--json"])).expect("presets"),
            Command::Presets { json: true }
        );
    }
}
