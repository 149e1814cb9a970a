use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use heat_conduction_toolbox::app::{self, AppError};
use heat_conduction_toolbox::conduction::{temperature_to_color, MaterialLayout, SinkCoupling};
use heat_conduction_toolbox::cube::ProximityCube;
use heat_conduction_toolbox::i18n::{self, Translator};
use heat_conduction_toolbox::{config, material_db, ui_cli};

/// 1차원 열전도 시뮬레이터
#[derive(Debug, Parser)]
#[command(name = "heat_conduction_toolbox", version, about)]
struct Cli {
    /// 표시 언어 (auto/ko/en)
    #[arg(long, short = 'L', global = true, default_value = "auto")]
    lang: String,
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 대화형 콘솔 (기본값)
    Console,
    /// 지정한 단계만큼 진행한 뒤 상태표를 출력한다
    Run {
        #[arg(long, default_value_t = 100)]
        ticks: usize,
        #[arg(long)]
        layout: Option<LayoutArg>,
        #[arg(long)]
        sink: Option<SinkArg>,
        /// 세그먼트 온도를 열원/열흡수원 범위로 제한하지 않는다
        #[arg(long)]
        no_clamp: bool,
    },
    /// 온도를 표시 색상으로 변환한다
    Color {
        #[arg(allow_hyphen_values = true)]
        temperature: f64,
    },
    /// 근접 가열 큐브 모델을 진행한다
    Cube {
        #[arg(long, default_value_t = 60)]
        ticks: usize,
        /// 열원까지의 거리
        #[arg(long, default_value_t = 1.0)]
        distance: f64,
        /// 재료 프리셋 코드 (metal, wood, glass)
        #[arg(long)]
        material: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    Single,
    Three,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SinkArg {
    Follow,
    Flux,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 선택한 명령을 실행한다.
fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let mut cfg = match config::load_or_default(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            log::warn!("설정을 읽지 못해 기본값을 사용합니다: {err}");
            config::Config::default()
        }
    };
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = Translator::new(&lang);

    if let Err(err) = try_run(cli, &mut cfg, &tr) {
        eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}

fn try_run(cli: Cli, cfg: &mut config::Config, tr: &Translator) -> Result<(), AppError> {
    match cli.command.unwrap_or(Command::Console) {
        Command::Console => app::run(cfg, &cli.config, tr)?,
        Command::Run {
            ticks,
            layout,
            sink,
            no_clamp,
        } => {
            if let Some(layout) = layout {
                cfg.layout = match layout {
                    LayoutArg::Single => MaterialLayout::Single,
                    LayoutArg::Three => MaterialLayout::ThreeMaterial,
                };
            }
            if let Some(sink) = sink {
                cfg.stepper.sink_coupling = match sink {
                    SinkArg::Follow => SinkCoupling::FollowLastSegment,
                    SinkArg::Flux => SinkCoupling::FluxCoupled,
                };
            }
            if no_clamp {
                cfg.stepper.clamp_to_boundaries = false;
            }
            let mut sim = cfg.build_simulation();
            sim.step_n(ticks);
            ui_cli::print_summary(tr, &sim, &cfg.display_units);
        }
        Command::Color { temperature } => {
            let color = temperature_to_color(temperature);
            println!("{color} {}", color.to_hex());
        }
        Command::Cube {
            ticks,
            distance,
            material,
        } => {
            let mut cube = ProximityCube::new();
            if let Some(code) = material {
                let preset = material_db::find_preset(&code).ok_or(AppError::UnknownPreset(code))?;
                cube.select_preset(preset);
            }
            for _ in 0..ticks {
                cube.update(distance);
            }
            ui_cli::print_cube(tr, &cube);
        }
    }
    Ok(())
}
