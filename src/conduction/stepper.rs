use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use super::material::{conductive_flux, Material, SweepParams, DEFAULT_AREA_M2, DEFAULT_THICKNESS_M};
use super::params::{
    accept, InputUnits, InvalidInputPolicy, Parameter, ParameterError, ParameterOutcome,
};
use crate::material_db;

/// 주변(초기) 온도 [°C]
pub const AMBIENT_C: f64 = 20.0;
/// 열원 기본 온도 [°C]
pub const DEFAULT_SOURCE_C: f64 = 100.0;

/// 열흡수원 온도를 갱신하는 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SinkCoupling {
    /// 마지막 세그먼트 온도를 그대로 따른다 (재료가 여럿이면 평균).
    FollowLastSegment,
    /// 마지막 세그먼트와의 열유속으로 갱신하며 재료 수로 나눠 합산한다.
    FluxCoupled,
}

/// 재료 배치 프리셋.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaterialLayout {
    Single,
    ThreeMaterial,
}

/// 스테퍼 수치 설정. 시간 간격과 비열을 명시적으로 둔 한 가지 파라미터화만 사용한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepperConfig {
    pub segment_count: usize,
    /// 한 스텝의 시뮬레이션 시간 Δt [s]
    pub time_step_s: f64,
    /// 비열 [J/(kg·K)]
    pub specific_heat: f64,
    /// 한 스텝 열유속 상한 [W]. `None`이면 제한하지 않는다.
    /// 설정 파일에서 키를 빼면 기본값이 쓰이므로 제한을 끄려면 0을 적는다.
    pub flux_limit: Option<f64>,
    /// 세그먼트 온도를 [열흡수원, 열원] 범위로 제한할지 여부
    pub clamp_to_boundaries: bool,
    pub sink_coupling: SinkCoupling,
    pub ambient_c: f64,
    pub default_source_c: f64,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            segment_count: super::material::DEFAULT_SEGMENT_COUNT,
            time_step_s: 0.1,
            specific_heat: 1000.0,
            flux_limit: Some(1000.0),
            clamp_to_boundaries: true,
            sink_coupling: SinkCoupling::FollowLastSegment,
            ambient_c: AMBIENT_C,
            default_source_c: DEFAULT_SOURCE_C,
        }
    }
}

impl StepperConfig {
    /// 0 이하 또는 유한하지 않은 값을 기본값으로 바꾼 설정을 돌려준다.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        let positive = |v: f64, fallback: f64| if v.is_normal() && v > 0.0 { v } else { fallback };
        Self {
            segment_count: if self.segment_count == 0 { d.segment_count } else { self.segment_count },
            time_step_s: positive(self.time_step_s, d.time_step_s),
            specific_heat: positive(self.specific_heat, d.specific_heat),
            flux_limit: self.flux_limit.filter(|l| l.is_finite() && *l > 0.0),
            clamp_to_boundaries: self.clamp_to_boundaries,
            sink_coupling: self.sink_coupling,
            ambient_c: if self.ambient_c.is_finite() { self.ambient_c } else { d.ambient_c },
            default_source_c: positive(self.default_source_c, d.default_source_c),
        }
    }

    fn sweep_params(&self) -> SweepParams {
        SweepParams {
            time_step_s: self.time_step_s,
            specific_heat: self.specific_heat,
            flux_limit: self.flux_limit,
            clamp_to_boundaries: self.clamp_to_boundaries,
        }
    }
}

/// 열원 → 재료 세그먼트 체인 → 열흡수원으로 이어진 1차원 전도 시뮬레이션 상태.
///
/// 모든 상태를 소유하며 `step()`으로만 시간이 진행된다. 주기 실행은
/// [`crate::scheduler`]가 담당한다.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    config: StepperConfig,
    materials: Vec<Material>,
    source_c: f64,
    sink_c: f64,
    input_units: InputUnits,
    invalid_input: InvalidInputPolicy,
    tick_count: u64,
}

impl Simulation {
    /// 배치 프리셋으로 시뮬레이션을 만든다.
    pub fn new(config: StepperConfig, layout: MaterialLayout) -> Self {
        let materials: Vec<(String, f64)> = match layout {
            MaterialLayout::Single => {
                vec![("Material".to_string(), super::material::DEFAULT_CONDUCTIVITY)]
            }
            MaterialLayout::ThreeMaterial => material_db::CHAIN_LAYOUT
                .iter()
                .filter_map(|code| material_db::find_preset(code))
                .map(|p| (p.name.to_string(), p.conductivity))
                .collect(),
        };
        Self::with_conductivities(config, &materials)
    }

    /// (이름, 열전도율) 목록으로 병렬 재료 경로를 구성한다. 빈 목록이면 기본 재료 하나를 쓴다.
    pub fn with_conductivities(config: StepperConfig, materials: &[(String, f64)]) -> Self {
        let config = config.sanitized();
        let mut built: Vec<Material> = materials
            .iter()
            .map(|(label, k)| {
                Material::new(label.clone(), config.segment_count, config.ambient_c)
                    .with_conductivity(*k)
            })
            .collect();
        if built.is_empty() {
            built.push(Material::new("Material", config.segment_count, config.ambient_c));
        }
        debug!(
            "시뮬레이션 생성: 재료 {}개, 세그먼트 {}개, 열흡수원 {:?}",
            built.len(),
            config.segment_count,
            config.sink_coupling
        );
        Self {
            source_c: config.default_source_c,
            sink_c: config.ambient_c,
            materials: built,
            config,
            input_units: InputUnits::default(),
            invalid_input: InvalidInputPolicy::default(),
            tick_count: 0,
        }
    }

    pub fn with_input_settings(mut self, units: InputUnits, policy: InvalidInputPolicy) -> Self {
        self.set_input_settings(units, policy);
        self
    }

    pub fn set_input_settings(&mut self, units: InputUnits, policy: InvalidInputPolicy) {
        self.input_units = units;
        self.invalid_input = policy;
    }

    pub fn config(&self) -> &StepperConfig {
        &self.config
    }

    pub fn input_units(&self) -> &InputUnits {
        &self.input_units
    }

    pub fn invalid_input_policy(&self) -> InvalidInputPolicy {
        self.invalid_input
    }

    /// 시간을 Δt만큼 진행한다.
    pub fn step(&mut self) {
        let params = self.config.sweep_params();
        let (source, sink) = (self.source_c, self.sink_c);
        for material in &mut self.materials {
            material.sweep(source, sink, &params);
        }
        self.update_sink();
        self.tick_count += 1;
        trace!(
            "tick {}: 열흡수원 {:.3} °C, 평균 {:?}",
            self.tick_count,
            self.sink_c,
            self.materials.iter().map(Material::average_temperature).collect::<Vec<_>>()
        );
    }

    pub fn step_n(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    fn update_sink(&mut self) {
        match self.config.sink_coupling {
            SinkCoupling::FollowLastSegment => {
                let n = self.materials.len() as f64;
                let last = self.materials.iter().map(Material::last_segment).sum::<f64>() / n;
                self.sink_c = if self.config.clamp_to_boundaries {
                    last.max(self.sink_c).min(self.source_c)
                } else {
                    last
                };
            }
            SinkCoupling::FluxCoupled => {
                let n = self.materials.len() as f64;
                for m in &self.materials {
                    let flux = conductive_flux(
                        m.conductivity(),
                        m.area_m2(),
                        m.thickness_m(),
                        m.last_segment(),
                        self.sink_c,
                        self.config.flux_limit,
                    );
                    let heat_capacity = m.area_m2() * m.thickness_m() * self.config.specific_heat;
                    self.sink_c += flux * self.config.time_step_s / heat_capacity / n;
                }
            }
        }
    }

    /// 사용자 입력 문자열로 항목을 설정한다.
    ///
    /// 숫자로 읽을 수 없거나 양수가 아니면, 또는 재료의 열용량이 0으로 떨어지는 값이면
    /// 오류 대신 정책에 따라 기본값(또는 현재 값)을 적용하고 [`ParameterOutcome::FellBack`]을 돌려준다. 오류는 재료 번호가
    /// 범위를 벗어날 때만 발생한다.
    pub fn set_parameter(
        &mut self,
        parameter: Parameter,
        raw: &str,
    ) -> Result<ParameterOutcome, ParameterError> {
        if let Some(i) = parameter.material() {
            if i >= self.materials.len() {
                return Err(ParameterError::NoSuchMaterial(i + 1));
            }
        }

        let accepted = accept(raw, parameter, &self.input_units)
            .filter(|v| self.keeps_material_finite(parameter, *v));
        let outcome = match accepted {
            Some(value) => ParameterOutcome::Applied(value),
            None => {
                let value = match self.invalid_input {
                    InvalidInputPolicy::RestoreDefault => self.default_for(parameter),
                    InvalidInputPolicy::KeepCurrent => self.current(parameter),
                };
                warn!("잘못된 입력 {raw:?} ({parameter}), {value} 사용");
                ParameterOutcome::FellBack(value)
            }
        };

        let value = outcome.value();
        match parameter {
            Parameter::Conductivity(i) => self.materials[i].set_conductivity(value),
            Parameter::Thickness(i) => self.materials[i].set_thickness(value),
            Parameter::Area(i) => self.materials[i].set_area(value),
            Parameter::SourceTemperature => self.source_c = value,
        }
        Ok(outcome)
    }

    /// 값을 적용해도 열용량 `A·L·c`가 정규 양수이고 `k·A/L`이 유한한지 확인한다.
    fn keeps_material_finite(&self, parameter: Parameter, value: f64) -> bool {
        let Some(m) = parameter.material().and_then(|i| self.materials.get(i)) else {
            return true;
        };
        let (mut k, mut l, mut a) = (m.conductivity(), m.thickness_m(), m.area_m2());
        match parameter {
            Parameter::Conductivity(_) => k = value,
            Parameter::Thickness(_) => l = value,
            Parameter::Area(_) => a = value,
            Parameter::SourceTemperature => {}
        }
        let heat_capacity = a * l * self.config.specific_heat;
        heat_capacity.is_normal() && (k * a / l).is_finite()
    }

    fn default_for(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Conductivity(i) => self.materials[i].default_conductivity(),
            Parameter::Thickness(_) => DEFAULT_THICKNESS_M,
            Parameter::Area(_) => DEFAULT_AREA_M2,
            Parameter::SourceTemperature => self.config.default_source_c,
        }
    }

    fn current(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Conductivity(i) => self.materials[i].conductivity(),
            Parameter::Thickness(i) => self.materials[i].thickness_m(),
            Parameter::Area(i) => self.materials[i].area_m2(),
            Parameter::SourceTemperature => self.source_c,
        }
    }

    /// 모든 세그먼트를 주변 온도로, 열원/열흡수원을 기본값으로 되돌린다. 물성값은 유지한다.
    pub fn reset(&mut self) {
        let ambient = self.config.ambient_c;
        for m in &mut self.materials {
            m.reset(ambient);
        }
        self.source_c = self.config.default_source_c;
        self.sink_c = ambient;
        self.tick_count = 0;
        info!("시뮬레이션 초기화");
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn material(&self, id: usize) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn segment_temperatures(&self, id: usize) -> Option<&[f64]> {
        self.material(id).map(Material::segments)
    }

    pub fn average_temperature(&self, id: usize) -> Option<f64> {
        self.material(id).map(Material::average_temperature)
    }

    pub fn cumulative_energy(&self, id: usize) -> Option<f64> {
        self.material(id).map(Material::cumulative_energy)
    }

    pub fn peak_energy(&self, id: usize) -> Option<f64> {
        self.material(id).map(Material::peak_energy)
    }

    pub fn source_temperature(&self) -> f64 {
        self.source_c
    }

    pub fn sink_temperature(&self) -> f64 {
        self.sink_c
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// 마지막 초기화 이후 진행된 시뮬레이션 시간 [s].
    pub fn elapsed_s(&self) -> f64 {
        self.tick_count as f64 * self.config.time_step_s
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(StepperConfig::default(), MaterialLayout::Single)
    }
}
