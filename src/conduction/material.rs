/// 기본 열전도율 [W/m·K]
pub const DEFAULT_CONDUCTIVITY: f64 = 0.5;
/// 기본 두께 [m] (10 cm)
pub const DEFAULT_THICKNESS_M: f64 = 0.1;
/// 기본 단면적 [m²] (200 cm²)
pub const DEFAULT_AREA_M2: f64 = 0.02;
/// 재료당 기본 세그먼트 수
pub const DEFAULT_SEGMENT_COUNT: usize = 10;

/// 한 번의 스윕에 필요한 수치 계수.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SweepParams {
    pub time_step_s: f64,
    pub specific_heat: f64,
    pub flux_limit: Option<f64>,
    pub clamp_to_boundaries: bool,
}

/// 두 온도점 사이의 열유속 `k·A·ΔT/L` [W]. 제한값이 있으면 `±limit` 안으로 자른다.
pub(crate) fn conductive_flux(
    conductivity: f64,
    area_m2: f64,
    thickness_m: f64,
    hot_c: f64,
    cold_c: f64,
    limit: Option<f64>,
) -> f64 {
    let flux = conductivity * area_m2 * (hot_c - cold_c) / thickness_m;
    match limit {
        Some(l) => flux.min(l).max(-l),
        None => flux,
    }
}

/// 열원과 열흡수원 사이에 놓인 재료 하나. 세그먼트 체인으로 1차원 전도를 근사한다.
///
/// 물성값은 항상 양수로 유지된다. 잘못된 입력은 [`crate::conduction::Simulation::set_parameter`]
/// 에서 기본값으로 치환되므로 이 타입은 검증된 값만 받는다.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    label: String,
    conductivity: f64,
    default_conductivity: f64,
    thickness_m: f64,
    area_m2: f64,
    segments: Vec<f64>,
    instantaneous_energy_j: f64,
    cumulative_energy_j: f64,
    peak_energy_j: f64,
}

impl Material {
    /// 기본 물성과 주변 온도로 채운 세그먼트를 가진 재료를 만든다.
    pub fn new(label: impl Into<String>, segment_count: usize, ambient_c: f64) -> Self {
        Self {
            label: label.into(),
            conductivity: DEFAULT_CONDUCTIVITY,
            default_conductivity: DEFAULT_CONDUCTIVITY,
            thickness_m: DEFAULT_THICKNESS_M,
            area_m2: DEFAULT_AREA_M2,
            segments: vec![ambient_c; segment_count.max(1)],
            instantaneous_energy_j: 0.0,
            cumulative_energy_j: 0.0,
            peak_energy_j: 0.0,
        }
    }

    /// 열전도율을 지정하고, 이후 잘못된 입력 시 복원할 기본값으로도 사용한다.
    /// 양수가 아니면 무시한다.
    pub fn with_conductivity(mut self, conductivity: f64) -> Self {
        if conductivity.is_finite() && conductivity > 0.0 {
            self.conductivity = conductivity;
            self.default_conductivity = conductivity;
        }
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn conductivity(&self) -> f64 {
        self.conductivity
    }

    pub fn default_conductivity(&self) -> f64 {
        self.default_conductivity
    }

    pub fn thickness_m(&self) -> f64 {
        self.thickness_m
    }

    pub fn area_m2(&self) -> f64 {
        self.area_m2
    }

    /// 열원 쪽부터 순서대로 나열된 세그먼트 온도 [°C].
    pub fn segments(&self) -> &[f64] {
        &self.segments
    }

    pub fn last_segment(&self) -> f64 {
        // new()가 최소 1개를 보장한다
        self.segments[self.segments.len() - 1]
    }

    pub fn average_temperature(&self) -> f64 {
        self.segments.iter().sum::<f64>() / self.segments.len() as f64
    }

    /// 직전 스텝에서 전달된 에너지 `Σ|q·Δt|` [J].
    pub fn instantaneous_energy(&self) -> f64 {
        self.instantaneous_energy_j
    }

    pub fn cumulative_energy(&self) -> f64 {
        self.cumulative_energy_j
    }

    pub fn peak_energy(&self) -> f64 {
        self.peak_energy_j
    }

    pub(crate) fn set_conductivity(&mut self, value: f64) {
        self.conductivity = value;
    }

    pub(crate) fn set_thickness(&mut self, value_m: f64) {
        self.thickness_m = value_m;
    }

    pub(crate) fn set_area(&mut self, value_m2: f64) {
        self.area_m2 = value_m2;
    }

    /// 세그먼트와 에너지 통계를 초기화한다. 물성값은 유지한다.
    pub(crate) fn reset(&mut self, ambient_c: f64) {
        self.segments.fill(ambient_c);
        self.instantaneous_energy_j = 0.0;
        self.cumulative_energy_j = 0.0;
        self.peak_energy_j = 0.0;
    }

    /// 열원에서 마지막 세그먼트까지 한 번 훑으며 온도를 갱신한다.
    ///
    /// 앞 세그먼트는 이번 스텝에서 이미 갱신된 값을 사용한다 (Gauss-Seidel 방식).
    pub(crate) fn sweep(&mut self, source_c: f64, sink_c: f64, params: &SweepParams) {
        let heat_capacity = self.area_m2 * self.thickness_m * params.specific_heat;
        let mut energy = 0.0;

        for i in 0..self.segments.len() {
            let previous = if i == 0 { source_c } else { self.segments[i - 1] };
            let flux = conductive_flux(
                self.conductivity,
                self.area_m2,
                self.thickness_m,
                previous,
                self.segments[i],
                params.flux_limit,
            );

            let mut next = self.segments[i] + flux * params.time_step_s / heat_capacity;
            if params.clamp_to_boundaries {
                // f64::clamp는 sink > source일 때 panic하므로 max/min 순서로 처리
                next = next.max(sink_c).min(source_c);
            }
            self.segments[i] = next;

            energy += (flux * params.time_step_s).abs();
        }

        self.instantaneous_energy_j = energy;
        self.cumulative_energy_j += energy;
        self.peak_energy_j = self.peak_energy_j.max(energy);
    }
}
