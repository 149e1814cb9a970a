/// 데모용 재료 물성 테이블과 조회 함수를 제공한다.
/// 값은 교육용 근사치이며 실제 설계 데이터로 사용하지 않는다.

#[derive(Debug)]
pub struct MaterialPreset {
    pub code: &'static str,
    pub name: &'static str,
    /// 열전도율 [W/m·K]
    pub conductivity: f64,
    /// 밀도 [g/cm³]. 큐브 모델의 냉각 속도 계산에만 쓰인다.
    pub density: Option<f64>,
}

/// 코드 또는 이름으로 프리셋을 찾는다. 대소문자는 구분하지 않는다.
pub fn find_preset(code: &str) -> Option<&'static MaterialPreset> {
    let code = code.trim();
    PRESETS
        .iter()
        .find(|m| m.code.eq_ignore_ascii_case(code) || m.name.eq_ignore_ascii_case(code))
}

/// 3재료 배치에서 사용하는 기본 재료 코드 (열원 쪽부터 순서대로).
pub const CHAIN_LAYOUT: [&str; 3] = ["material-1", "material-2", "material-3"];

static PRESETS: &[MaterialPreset] = &[
    MaterialPreset {
        code: "metal",
        name: "Metal",
        conductivity: 205.0,
        density: Some(7.85),
    },
    MaterialPreset {
        code: "wood",
        name: "Wood",
        conductivity: 0.13,
        density: Some(0.6),
    },
    MaterialPreset {
        code: "glass",
        name: "Glass",
        conductivity: 1.0,
        density: Some(2.5),
    },
    MaterialPreset {
        code: "material-1",
        name: "Material 1",
        conductivity: 0.5,
        density: None,
    },
    MaterialPreset {
        code: "material-2",
        name: "Material 2",
        conductivity: 0.3,
        density: None,
    },
    MaterialPreset {
        code: "material-3",
        name: "Material 3",
        conductivity: 0.7,
        density: None,
    },
];
