//! 상태표에 쓰는 파생 값. 모두 순수 함수이며 시뮬레이션을 변경하지 않는다.

use super::material::Material;
use super::stepper::Simulation;

/// 표 요약용 에너지 근사에 쓰는 고정 시간 계수 [s].
pub const TABLE_ENERGY_TIME_FACTOR: f64 = 0.01;

/// 인접 세그먼트 온도차 합에 열전도율과 고정 시간 계수를 곱한 전달 에너지 근사 [J].
///
/// `step()`이 누적하는 열유속 기반 에너지와는 정의가 다르며 별도로 보고한다.
pub fn table_energy(material: &Material) -> f64 {
    material
        .segments()
        .windows(2)
        .map(|w| (w[1] - w[0]).abs() * material.conductivity() * TABLE_ENERGY_TIME_FACTOR)
        .sum()
}

/// 상태표의 행 종류.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Source,
    Material { index: usize, label: String },
    Sink,
}

/// 상태표 한 행. 열원/열흡수원 행은 재료 관련 값이 없다.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub element: Element,
    /// 평균 온도 [°C]
    pub temperature_c: f64,
    pub conductivity: Option<f64>,
    pub thickness_m: Option<f64>,
    pub area_m2: Option<f64>,
    /// 온도차 기반 근사 에너지 [J]
    pub table_energy_j: Option<f64>,
    /// 직전 스텝 열유속 에너지 [J]
    pub instantaneous_energy_j: Option<f64>,
    pub peak_energy_j: Option<f64>,
    pub cumulative_energy_j: Option<f64>,
}

impl SummaryRow {
    fn boundary(element: Element, temperature_c: f64) -> Self {
        Self {
            element,
            temperature_c,
            conductivity: None,
            thickness_m: None,
            area_m2: None,
            table_energy_j: None,
            instantaneous_energy_j: None,
            peak_energy_j: None,
            cumulative_energy_j: None,
        }
    }
}

/// 열원, 재료들, 열흡수원 순으로 상태표를 만든다.
pub fn summary_rows(sim: &Simulation) -> Vec<SummaryRow> {
    let mut rows = Vec::with_capacity(sim.material_count() + 2);
    rows.push(SummaryRow::boundary(Element::Source, sim.source_temperature()));
    for (index, m) in sim.materials().iter().enumerate() {
        rows.push(SummaryRow {
            element: Element::Material {
                index,
                label: m.label().to_string(),
            },
            temperature_c: m.average_temperature(),
            conductivity: Some(m.conductivity()),
            thickness_m: Some(m.thickness_m()),
            area_m2: Some(m.area_m2()),
            table_energy_j: Some(table_energy(m)),
            instantaneous_energy_j: Some(m.instantaneous_energy()),
            peak_energy_j: Some(m.peak_energy()),
            cumulative_energy_j: Some(m.cumulative_energy()),
        });
    }
    rows.push(SummaryRow::boundary(Element::Sink, sim.sink_temperature()));
    rows
}
