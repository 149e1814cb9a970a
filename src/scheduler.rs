//! 스테퍼를 주기적으로 호출하는 실행기.
//!
//! 시뮬레이션 자체는 동기적이고 순수하며, 시간 진행은 이 모듈의 틱 스케줄러가 맡는다.
//! 틱은 한 스레드에서 직렬로만 실행되고, `stop()`이 반환된 뒤에는 더 이상 틱이 발생하지 않는다.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{error, info};

use crate::conduction::Simulation;

/// 여러 스레드가 공유하는 시뮬레이션 상태.
pub type SharedSimulation = Arc<Mutex<Simulation>>;

/// 각 틱 뒤에 호출되는 표시 콜백.
pub type TickCallback = Arc<dyn Fn(&Simulation) + Send + Sync>;

/// 실행 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// 주기 실행기 인터페이스.
pub trait TickScheduler {
    /// 주기 실행을 시작한다. 이미 실행 중이면 먼저 정지한 뒤 다시 시작한다.
    fn start(&mut self, interval: Duration);
    /// 실행을 멈춘다. 반환 이후 추가 틱은 없다.
    fn stop(&mut self);
    fn state(&self) -> RunState;
}

struct Worker {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

/// 전용 스레드에서 `step()`과 콜백을 주기적으로 호출한다.
pub struct ThreadTicker {
    simulation: SharedSimulation,
    on_tick: TickCallback,
    worker: Option<Worker>,
}

impl ThreadTicker {
    pub fn new(simulation: SharedSimulation, on_tick: TickCallback) -> Self {
        Self {
            simulation,
            on_tick,
            worker: None,
        }
    }

    /// 콜백 없이 상태만 진행하는 실행기.
    pub fn headless(simulation: SharedSimulation) -> Self {
        Self::new(simulation, Arc::new(|_: &Simulation| {}))
    }
}

impl TickScheduler for ThreadTicker {
    fn start(&mut self, interval: Duration) {
        self.stop();

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let simulation = Arc::clone(&self.simulation);
        let on_tick = Arc::clone(&self.on_tick);

        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    let Ok(mut sim) = simulation.lock() else {
                        error!("시뮬레이션 잠금이 오염되어 실행을 중단합니다");
                        break;
                    };
                    sim.step();
                    on_tick(&*sim);
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        info!("시뮬레이션 시작 (주기 {} ms)", interval.as_millis());
        self.worker = Some(Worker { stop_tx, handle });
    }

    fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        // 수신 측이 이미 종료했으면 send가 실패하지만 join만 하면 된다
        let _ = worker.stop_tx.send(());
        if worker.handle.join().is_err() {
            error!("틱 스레드가 비정상 종료되었습니다");
        }
        info!("시뮬레이션 정지");
    }

    fn state(&self) -> RunState {
        if self.worker.is_some() {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }
}

impl Drop for ThreadTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
