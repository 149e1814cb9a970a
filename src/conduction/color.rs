use std::fmt;

/// 8비트 RGB 색상.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// 온도 [°C]를 저온/중온/고온 구간별 선형 색상으로 변환한다.
///
/// - 50 °C 미만: 파랑이 `255 - 2t`로 감소
/// - 50~100 °C: 빨강 `5(t-50)` 증가, 파랑 `255 - 5(t-50)` 감소
/// - 100 °C 이상: 빨강 255 고정, 초록 `2(t-100)` 증가
///
/// 각 채널은 0~255로 제한한 뒤 반올림한다.
pub fn temperature_to_color(temp_c: f64) -> Rgb {
    let (r, g, b) = if temp_c < 50.0 {
        (0.0, 0.0, 255.0 - temp_c * 2.0)
    } else if temp_c < 100.0 {
        let t = temp_c - 50.0;
        (t * 5.0, 0.0, 255.0 - t * 5.0)
    } else {
        (255.0, (temp_c - 100.0) * 2.0, 0.0)
    };
    Rgb::new(channel(r), channel(g), channel(b))
}
