use std::collections::HashMap;
use std::fmt::Write;
use std::time::{Duration, Instant};

use crate::floating_type_mod::FT;

#[derive(Clone, Debug)]
pub struct Counter<T> {
    values: Vec<T>,
    last_start: Instant,
}
impl<T> Counter<T> {
    fn new() -> Self {
        Counter::<T> {
            last_start: Instant::now(),
            values: Vec::new(),
        }
    }
    fn add_value(&mut self, v: T) {
        self.values.push(v);
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
impl Counter<FT> {
    pub fn sum(&self) -> FT {
        self.values.iter().cloned().sum::<FT>()
    }
    pub fn avg(&self) -> FT {
        self.sum() / self.values.len() as FT
    }
    pub fn min(&self) -> FT {
        self.values.iter().cloned().fold(FT::INFINITY, FT::min)
    }
    pub fn max(&self) -> FT {
        self.values.iter().cloned().fold(FT::NEG_INFINITY, FT::max)
    }
}
impl Counter<Duration> {
    fn begin(&mut self) {
        self.last_start = Instant::now();
    }

    fn end(&mut self) {
        self.values.push(Instant::now() - self.last_start);
    }

    pub fn avg(&self) -> Duration {
        self.sum() / self.values.len().max(1) as u32
    }

    pub fn sum(&self) -> Duration {
        self.values.iter().cloned().sum::<Duration>()
    }
}

/// Per-tick values (event times, event kinds, ...) keyed by name.
#[derive(Clone, Debug)]
pub struct ValueCounters {
    pub counters: HashMap<String, Counter<FT>>,
    enabled: bool,
}
impl ValueCounters {
    pub fn new(enabled: bool) -> ValueCounters {
        ValueCounters {
            counters: HashMap::default(),
            enabled,
        }
    }

    pub fn add_value(&mut self, id: &str, v: FT) {
        if self.enabled {
            self.counters
                .entry(id.to_string())
                .or_insert_with(Counter::<FT>::new)
                .add_value(v);
        }
    }
}

/// Wall clock time spent per phase.
#[derive(Clone, Debug)]
pub struct PerformanceCounters {
    pub counters: HashMap<String, Counter<Duration>>,
    enabled: bool,
}
impl PerformanceCounters {
    pub fn new(enabled: bool) -> PerformanceCounters {
        PerformanceCounters {
            counters: HashMap::default(),
            enabled,
        }
    }

    pub fn begin(&mut self, id: &str) {
        if self.enabled {
            self.counters
                .entry(id.to_string())
                .or_insert_with(Counter::<Duration>::new)
                .begin();
        }
    }

    pub fn end(&mut self, id: &str) {
        if self.enabled {
            if let Some(counter) = self.counters.get_mut(id) {
                counter.end();
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Statistics {
    pub pcounters: PerformanceCounters,
    pub vcounters: ValueCounters,
}

impl Statistics {
    pub fn new(enabled: bool) -> Self {
        Statistics {
            pcounters: PerformanceCounters::new(enabled),
            vcounters: ValueCounters::new(enabled),
        }
    }

    /// Human readable summary, counters sorted by name.
    pub fn write(&self) -> String {
        let mut s = String::new();

        if let Some(step) = self.pcounters.counters.get("simulation-step") {
            writeln!(s, "simulation-time: {}ms", step.sum().as_secs_f64() * 1000.).unwrap();
            writeln!(s, "ticks: {}", step.len()).unwrap();
            writeln!(s).unwrap();
        }

        let mut v = self.pcounters.counters.iter().collect::<Vec<_>>();
        v.sort_by(|x, y| x.0.cmp(y.0));
        for (label, pcounter) in v {
            writeln!(s, "{}: avg:{}ms", label, pcounter.avg().as_secs_f64() * 1000.).unwrap();
        }
        writeln!(s).unwrap();

        let mut v = self.vcounters.counters.iter().collect::<Vec<_>>();
        v.sort_by(|x, y| x.0.cmp(y.0));
        for (label, vcounter) in v {
            writeln!(
                s,
                "{}: count:{} sum:{} min:{} max:{} avg:{}",
                label,
                vcounter.len(),
                vcounter.sum(),
                vcounter.min(),
                vcounter.max(),
                vcounter.avg()
            ).unwrap();
        }

        s
    }
}
