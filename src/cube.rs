//! 열원 근처로 옮기면 데워지고 멀어지면 식는 단일 물체 모델.
//!
//! 물체 위치는 호출 측이 관리하고, 이 모듈은 거리만 받아 온도와 이력을 갱신한다.

use std::collections::{vec_deque, VecDeque};

use log::debug;

use crate::material_db::MaterialPreset;

/// 주변 온도 [°C]. 냉각의 하한.
pub const CUBE_AMBIENT_C: f64 = 20.0;
/// 가열 상한 [°C]
pub const CUBE_MAX_C: f64 = 1000.0;
/// 이 거리 미만이면 열원 근처로 본다.
pub const HEATING_RANGE: f64 = 2.0;
pub const DEFAULT_HEATING_RATE: f64 = 0.2;
pub const DEFAULT_COOLING_RATE: f64 = 0.05;
/// 한 번의 갱신이 나타내는 시간 [s]
pub const SECONDS_PER_UPDATE: f64 = 1.0;
/// 이력 중 화면에 보이는 최근 구간 [s]
pub const HISTORY_WINDOW_S: f64 = 100.0;
/// 이력 최대 보관 개수
pub const HISTORY_CAPACITY: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// (시간 [s], 온도 [°C]) 표본 목록. 용량을 넘으면 가장 오래된 표본부터 버린다.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureHistory {
    samples: VecDeque<(f64, f64)>,
    capacity: usize,
}

impl TemperatureHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, time_s: f64, temp_c: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back((time_s, temp_c));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 오래된 것부터 모든 표본.
    pub fn samples(&self) -> vec_deque::Iter<'_, (f64, f64)> {
        self.samples.iter()
    }

    /// 마지막 표본 기준 `HISTORY_WINDOW_S` 이내의 표본.
    pub fn visible_window(&self) -> vec_deque::Iter<'_, (f64, f64)> {
        let Some(&(latest, _)) = self.samples.back() else {
            return self.samples.range(0..0);
        };
        let from = (latest - HISTORY_WINDOW_S).max(0.0);
        let start = self.samples.partition_point(|(t, _)| *t < from);
        self.samples.range(start..)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for TemperatureHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProximityCube {
    temperature_c: f64,
    heating_rate: f64,
    cooling_rate: f64,
    elapsed_s: f64,
    history: TemperatureHistory,
}

impl Default for ProximityCube {
    fn default() -> Self {
        Self {
            temperature_c: CUBE_AMBIENT_C,
            heating_rate: DEFAULT_HEATING_RATE,
            cooling_rate: DEFAULT_COOLING_RATE,
            elapsed_s: 0.0,
            history: TemperatureHistory::default(),
        }
    }
}

impl ProximityCube {
    pub fn new() -> Self {
        Self::default()
    }

    /// 프리셋 물성으로 가열/냉각 속도를 정한다.
    /// 가열 속도는 열전도율/1000, 냉각 속도는 밀도/100이며 밀도가 없으면 냉각 속도는 유지한다.
    pub fn select_preset(&mut self, preset: &MaterialPreset) {
        self.heating_rate = preset.conductivity / 1000.0;
        if let Some(density) = preset.density {
            self.cooling_rate = density / 100.0;
        }
        debug!(
            "큐브 재료 {}: 가열 {:.5}, 냉각 {:.4}",
            preset.code, self.heating_rate, self.cooling_rate
        );
    }

    /// 열원과의 거리로 한 번 갱신하고 새 온도를 돌려준다.
    pub fn update(&mut self, distance: f64) -> f64 {
        self.temperature_c = if distance < HEATING_RANGE {
            (self.temperature_c + self.heating_rate).min(CUBE_MAX_C)
        } else {
            (self.temperature_c - self.cooling_rate).max(CUBE_AMBIENT_C)
        };
        self.elapsed_s += SECONDS_PER_UPDATE;
        self.history.push(self.elapsed_s, self.temperature_c);
        self.temperature_c
    }

    pub fn update_at(&mut self, cube: &Position, source: &Position) -> f64 {
        self.update(cube.distance_to(source))
    }

    pub fn reset(&mut self) {
        self.temperature_c = CUBE_AMBIENT_C;
        self.elapsed_s = 0.0;
        self.history.clear();
    }

    pub fn temperature(&self) -> f64 {
        self.temperature_c
    }

    pub fn heating_rate(&self) -> f64 {
        self.heating_rate
    }

    pub fn cooling_rate(&self) -> f64 {
        self.cooling_rate
    }

    pub fn history(&self) -> &TemperatureHistory {
        &self.history
    }
}
