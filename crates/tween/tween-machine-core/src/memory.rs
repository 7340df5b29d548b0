//! In-memory host: owns curves, a playhead and a busy counter.
//!
//! Useful for embedding the engine without a real animation package, and for
//! tests, which can inject read/write failures per curve and make the default
//! tangent query fail.

use std::cell::Cell;

use crate::data::{AnimationCurve, Keyframe};
use crate::error::{HostError, TweenError};
use crate::host::{CurveAccess, Timeline};
use crate::ids::{CurveId, IdAllocator};
use crate::stored_curves::parse_curve_set_json;
use crate::tangent::{TangentPair, TangentType};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fault {
    /// Tangent/value reads on the curve fail.
    Read,
    /// Key and in-tangent writes on the curve fail.
    Write,
}

/// One `mark_special_tick` call as seen by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct SpecialTick {
    pub time: f64,
    pub curves: Vec<CurveId>,
}

#[derive(Debug)]
pub struct MemoryHost {
    ids: IdAllocator,
    curves: Vec<(CurveId, AnimationCurve)>,
    faults: Vec<(CurveId, Fault)>,
    defaults_fault: bool,
    time: f64,
    busy_depth: u32,
    busy_acquisitions: u32,
    default_tangents: TangentPair,
    default_tangent_reads: Cell<u32>,
    special_ticks: Vec<SpecialTick>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            ids: IdAllocator::new(),
            curves: Vec::new(),
            faults: Vec::new(),
            defaults_fault: false,
            time: 0.0,
            busy_depth: 0,
            busy_acquisitions: 0,
            default_tangents: TangentPair::default(),
            default_tangent_reads: Cell::new(0),
            special_ticks: Vec::new(),
        }
    }

    pub fn add_curve(&mut self, curve: AnimationCurve) -> CurveId {
        let id = self.ids.alloc_curve();
        self.curves.push((id, curve));
        id
    }

    /// Parse a JSON curve set and add every curve, returning their ids in order.
    pub fn load_curve_set_json(&mut self, json: &str) -> Result<Vec<CurveId>, TweenError> {
        let curves = parse_curve_set_json(json)?;
        Ok(curves.into_iter().map(|c| self.add_curve(c)).collect())
    }

    pub fn curve(&self, id: CurveId) -> Option<&AnimationCurve> {
        self.curves
            .iter()
            .find_map(|(cid, c)| if *cid == id { Some(c) } else { None })
    }

    pub fn curve_by_name(&self, name: &str) -> Option<CurveId> {
        self.curves
            .iter()
            .find_map(|(cid, c)| if c.name == name { Some(*cid) } else { None })
    }

    pub fn curve_ids(&self) -> Vec<CurveId> {
        self.curves.iter().map(|(id, _)| *id).collect()
    }

    pub fn set_default_tangents(&mut self, tangents: TangentPair) {
        self.default_tangents = tangents;
    }

    pub fn inject_fault(&mut self, curve: CurveId, fault: Fault) {
        self.faults.push((curve, fault));
    }

    /// Make `global_default_tangents` fail until faults are cleared.
    pub fn fail_default_tangents(&mut self) {
        self.defaults_fault = true;
    }

    pub fn clear_faults(&mut self) {
        self.faults.clear();
        self.defaults_fault = false;
    }

    /// Busy scopes currently held.
    pub fn busy_depth(&self) -> u32 {
        self.busy_depth
    }

    /// Total number of busy scopes ever opened.
    pub fn busy_acquisitions(&self) -> u32 {
        self.busy_acquisitions
    }

    /// Number of `global_default_tangents` queries served.
    pub fn default_tangent_reads(&self) -> u32 {
        self.default_tangent_reads.get()
    }

    pub fn special_ticks(&self) -> &[SpecialTick] {
        &self.special_ticks
    }

    fn has_fault(&self, curve: CurveId, fault: Fault) -> bool {
        self.faults.iter().any(|(c, f)| *c == curve && *f == fault)
    }

    fn get(&self, id: CurveId) -> Result<&AnimationCurve, HostError> {
        self.curve(id)
            .ok_or_else(|| HostError::new(format!("unknown curve {id}")))
    }

    fn get_mut(&mut self, id: CurveId) -> Result<&mut AnimationCurve, HostError> {
        self.curves
            .iter_mut()
            .find_map(|(cid, c)| if *cid == id { Some(c) } else { None })
            .ok_or_else(|| HostError::new(format!("unknown curve {id}")))
    }

    fn key(&self, id: CurveId, time: f64) -> Result<&Keyframe, HostError> {
        if self.has_fault(id, Fault::Read) {
            return Err(HostError::new(format!("read fault injected on {id}")));
        }
        self.get(id)?
            .key_at(time)
            .ok_or_else(|| HostError::new(format!("no key on {id} at time {time}")))
    }

    fn check_writable(&self, id: CurveId) -> Result<(), HostError> {
        if self.has_fault(id, Fault::Write) {
            return Err(HostError::new(format!("write fault injected on {id}")));
        }
        Ok(())
    }
}

impl CurveAccess for MemoryHost {
    type Curve = CurveId;

    fn find_bounding_keys(&self, curve: &CurveId, time: f64) -> Option<(f64, f64)> {
        let (prev, next) = self.curve(*curve)?.bounding_keys(time)?;
        Some((prev.time, next.time))
    }

    fn read_tangents(&self, curve: &CurveId, time: f64) -> Result<TangentPair, HostError> {
        self.key(*curve, time).map(Keyframe::tangents)
    }

    fn read_value(&self, curve: &CurveId, time: f64) -> Result<f64, HostError> {
        self.key(*curve, time).map(|k| k.value)
    }

    fn write_keyframe(
        &mut self,
        curve: &CurveId,
        time: f64,
        value: f64,
        out_tangent: TangentType,
    ) -> Result<(), HostError> {
        self.check_writable(*curve)?;
        let in_tangent = self.default_tangents.in_tangent;
        self.get_mut(*curve)?
            .upsert_key(Keyframe::new(time, value, in_tangent, out_tangent));
        Ok(())
    }

    fn write_in_tangent(
        &mut self,
        curve: &CurveId,
        time: f64,
        in_tangent: TangentType,
    ) -> Result<(), HostError> {
        self.check_writable(*curve)?;
        let id = *curve;
        if self.get_mut(id)?.set_in_tangent(time, in_tangent) {
            Ok(())
        } else {
            Err(HostError::new(format!("no key on {id} at time {time}")))
        }
    }

    fn global_default_tangents(&self) -> Result<TangentPair, HostError> {
        self.default_tangent_reads
            .set(self.default_tangent_reads.get() + 1);
        if self.defaults_fault {
            return Err(HostError::new("default tangent query fault injected"));
        }
        Ok(self.default_tangents)
    }

    fn mark_breakdown(&mut self, curve: &CurveId, time: f64) -> Result<(), HostError> {
        self.check_writable(*curve)?;
        let id = *curve;
        if self.get_mut(id)?.set_breakdown(time, true) {
            Ok(())
        } else {
            Err(HostError::new(format!("no key on {id} at time {time}")))
        }
    }

    fn mark_special_tick(&mut self, curves: &[CurveId], time: f64) -> Result<(), HostError> {
        self.special_ticks.push(SpecialTick {
            time,
            curves: curves.to_vec(),
        });
        Ok(())
    }
}

impl Timeline for MemoryHost {
    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, time: f64) {
        self.time = time;
    }

    fn begin_busy(&mut self) {
        self.busy_depth += 1;
        self.busy_acquisitions += 1;
    }

    fn end_busy(&mut self) {
        self.busy_depth = self.busy_depth.saturating_sub(1);
    }
}
