//! Engine: runs a tween request against a host.
//!
//! Per call:
//! - acquire the timeline scope (playhead captured, busy raised)
//! - resolve fallback tangents once (config override or host defaults)
//! - per curve: bounding keys → reads → plan → write key → write in-tangent
//!   (unless step) → breakdown flag (breakdown mode)
//! - special tick across all written curves (when enabled)
//! - scope drop restores the playhead and lowers busy, on every exit path
//!
//! Curves without bounding keys are skipped. Any other per-curve failure aborts
//! the batch; keys already written stay.

use log::{debug, info, warn};

use crate::bias::Bias;
use crate::config::{KeyMode, TweenConfig};
use crate::error::{HostError, TweenError};
use crate::guard::TimelineGuard;
use crate::host::{CurveAccess, Timeline};
use crate::outputs::{KeyChange, PlannedKey, TweenReport};
use crate::plan::{plan_key, Neighbour};
use crate::request::{check_time, TweenRequest};
use crate::tangent::TangentPair;

const DEFAULTS_SOURCE: &str = "<global default tangents>";

#[derive(Debug, Default, Clone)]
pub struct TweenEngine {
    cfg: TweenConfig,
}

fn curve_label<C: std::fmt::Debug>(curve: &C) -> String {
    format!("{curve:?}")
}

impl TweenEngine {
    pub fn new(cfg: TweenConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &TweenConfig {
        &self.cfg
    }

    pub fn config_mut(&mut self) -> &mut TweenConfig {
        &mut self.cfg
    }

    /// Tween `curves` at the host's current playhead with a signed bias in [-1,1].
    /// The bias is validated before the host is touched.
    pub fn tween_at_playhead<H>(
        &self,
        host: &mut H,
        curves: Vec<H::Curve>,
        bias: f64,
    ) -> Result<TweenReport<H::Curve>, TweenError>
    where
        H: CurveAccess + Timeline,
    {
        let bias = Bias::new(bias)?;
        let req = TweenRequest::with_bias(curves, host.current_time(), bias);
        self.tween(host, &req)
    }

    /// Write at most one interpolated key per requested curve.
    pub fn tween<H>(
        &self,
        host: &mut H,
        req: &TweenRequest<H::Curve>,
    ) -> Result<TweenReport<H::Curve>, TweenError>
    where
        H: CurveAccess + Timeline,
    {
        check_time(req.current_time)?;
        let mut report = TweenReport::default();
        if req.curves.is_empty() {
            debug!("tween: no curves requested");
            return Ok(report);
        }

        let mut host = TimelineGuard::acquire(host);

        let defaults = match self.cfg.default_tangents {
            Some(pair) => pair,
            None => host
                .global_default_tangents()
                .map_err(|source| TweenError::HostQuery {
                    curve: DEFAULTS_SOURCE.to_string(),
                    source,
                })?,
        };

        for curve in &req.curves {
            match self.tween_curve(&mut *host, curve, req.current_time, req.bias, defaults) {
                Ok(key) => report.written.push(KeyChange {
                    curve: curve.clone(),
                    key,
                }),
                Err(err) if !err.is_fatal() => {
                    debug!("tween: skipping {curve:?}: {err}");
                    report.skipped.push(curve.clone());
                }
                Err(err) => {
                    warn!("tween: aborting batch at {curve:?}: {err}");
                    return Err(err);
                }
            }
        }

        if self.cfg.special_tick && !report.written.is_empty() {
            let written: Vec<H::Curve> = report.written.iter().map(|c| c.curve.clone()).collect();
            host.mark_special_tick(&written, req.current_time)
                .map_err(|source| TweenError::HostWrite {
                    curve: curve_label(&written),
                    time: req.current_time,
                    source,
                })?;
        }

        info!(
            "tween at {} (f={:.3}): {} written, {} skipped",
            req.current_time,
            req.bias.fraction(),
            report.written.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    fn tween_curve<H: CurveAccess>(
        &self,
        host: &mut H,
        curve: &H::Curve,
        time: f64,
        bias: Bias,
        defaults: TangentPair,
    ) -> Result<PlannedKey, TweenError> {
        let (time_prev, time_next) =
            host.find_bounding_keys(curve, time)
                .ok_or_else(|| TweenError::NoBoundingKey {
                    curve: curve_label(curve),
                    time,
                })?;

        let prev = read_neighbour(host, curve, time_prev)?;
        let next = read_neighbour(host, curve, time_next)?;
        let key = plan_key(&prev, &next, time, bias, defaults);

        let write_err = |source: HostError| TweenError::HostWrite {
            curve: curve_label(curve),
            time,
            source,
        };
        host.write_keyframe(curve, time, key.value, key.out_tangent)
            .map_err(write_err)?;
        if key.writes_in_tangent() {
            host.write_in_tangent(curve, time, key.in_tangent)
                .map_err(write_err)?;
        }
        if self.cfg.key_mode == KeyMode::Breakdown {
            host.mark_breakdown(curve, time).map_err(write_err)?;
        }

        debug!(
            "tween: {curve:?} @ {time} = {} (in={}, out={}, {:?})",
            key.value, key.in_tangent, key.out_tangent, key.rule
        );
        Ok(key)
    }
}

fn read_neighbour<H: CurveAccess>(
    host: &H,
    curve: &H::Curve,
    time: f64,
) -> Result<Neighbour, TweenError> {
    let query_err = |source: HostError| TweenError::HostQuery {
        curve: curve_label(curve),
        source,
    };
    let tangents = host.read_tangents(curve, time).map_err(query_err)?;
    let value = host.read_value(curve, time).map_err(query_err)?;
    Ok(Neighbour {
        time,
        value,
        tangents,
    })
}
