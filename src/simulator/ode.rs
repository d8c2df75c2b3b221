use super::{Equation, IntegratorConfig, Trajectory, LS, M, T, V};
use crate::LipidsolError;

use diffsol::{
    error::{DiffsolError, OdeSolverError},
    OdeBuilder, OdeSolverMethod, OdeSolverStopReason,
};
use ndarray::Array2;

/// Evaluate the right-hand side, enforcing non-negativity when requested.
#[inline(always)]
fn rhs<E: Equation>(equation: &E, nonnegative: bool, x: &V, t: T, y: &mut V) {
    equation.diffeq(x.as_slice(), t, y.as_mut_slice());
    if nonnegative {
        for (dy, &xi) in y.iter_mut().zip(x.iter()) {
            if xi <= 0.0 && *dy < 0.0 {
                *dy = 0.0;
            }
        }
    }
}

/// Forward difference approximation of the jacobian-vector product `J(x) v`.
///
/// The step is the largest one that moves no component `x_i` by more than
/// `sqrt(eps) * (1 + |x_i|)`, so small states are not swamped by large ones.
fn jac_mul<E: Equation>(equation: &E, nonnegative: bool, x: &V, t: T, v: &V, y: &mut V) {
    let eps = x
        .iter()
        .zip(v.iter())
        .filter(|(_, vi)| **vi != 0.0)
        .map(|(xi, vi)| (1.0 + xi.abs()) / vi.abs())
        .fold(T::INFINITY, T::min)
        * T::EPSILON.sqrt();
    if !eps.is_finite() {
        y.fill(0.0);
        return;
    }
    let mut f0 = V::zeros(x.len());
    rhs(equation, nonnegative, x, t, &mut f0);
    let shifted = x + v * eps;
    rhs(equation, nonnegative, &shifted, t, y);
    y.axpy(-1.0 / eps, &f0, 1.0 / eps);
}

/// Largest time strictly below `t`.
fn just_below(t: T) -> T {
    if t > 0.0 {
        T::from_bits(t.to_bits() - 1)
    } else if t < 0.0 {
        T::from_bits(t.to_bits() + 1)
    } else {
        -T::from_bits(1)
    }
}

fn validate_times(times: &[f64]) -> Result<(), LipidsolError> {
    if times.is_empty()
        || times.iter().any(|t| !t.is_finite())
        || times.windows(2).any(|w| w[1] < w[0])
    {
        return Err(LipidsolError::InvalidTimes);
    }
    Ok(())
}

/// Integrate `equation` from `y0` and report the state at each of `times`.
///
/// The first entry of `times` is the initial time, so the first row of the returned
/// [Trajectory] is `y0` itself. Repeated times are allowed and repeat the state.
///
/// The integration is split at every [Equation::breakpoints] inside the time span.
/// Each piece starts a fresh solver, and the right-hand side of a piece ending at a
/// breakpoint is evaluated just before it, so a switch at that time only acts on the
/// next piece.
pub fn integrate<E>(
    equation: &E,
    y0: &[f64],
    times: &[f64],
    config: &IntegratorConfig,
) -> Result<Trajectory, LipidsolError>
where
    E: Equation + Clone + 'static,
{
    validate_times(times)?;
    let nstates = equation.nstates();
    if y0.len() != nstates {
        return Err(LipidsolError::StateDimension {
            expected: nstates,
            found: y0.len(),
        });
    }
    let t0 = times[0];
    let t_end = times[times.len() - 1];

    let mut dy0 = vec![0.0; nstates];
    equation.diffeq(y0, t0, &mut dy0);
    if let Some(component) = dy0.iter().position(|v| !v.is_finite()) {
        return Err(LipidsolError::NonFiniteState {
            time: t0,
            component,
        });
    }

    let mut breakpoints: Vec<T> = equation
        .breakpoints()
        .into_iter()
        .filter(|&b| b > t0 && b < t_end)
        .collect();
    breakpoints.sort_by(|a, b| a.total_cmp(b));
    breakpoints.dedup();

    let mut data = Vec::with_capacity(times.len() * nstates);
    let mut state = y0.to_vec();
    let mut t_start = t0;
    let mut first = 0;

    for &breakpoint in &breakpoints {
        let last = first + times[first..].partition_point(|&t| t <= breakpoint);
        state = integrate_piece(
            equation,
            &state,
            t_start,
            breakpoint,
            Some(breakpoint),
            &times[first..last],
            config,
            &mut data,
        )?;
        tracing::trace!(breakpoint, "restarting solver at breakpoint");
        t_start = breakpoint;
        first = last;
    }
    integrate_piece(
        equation,
        &state,
        t_start,
        t_end,
        None,
        &times[first..],
        config,
        &mut data,
    )?;

    tracing::debug!(
        nstates,
        npoints = times.len(),
        nbreakpoints = breakpoints.len(),
        t_end,
        "integration finished"
    );

    let states = Array2::from_shape_vec((times.len(), nstates), data)?;
    Ok(Trajectory::new(times.to_vec().into(), states))
}

/// Integrate from `y_start` at `t_start` up to `t_stop`, pushing the state at each of
/// `times` onto `data`, and return the state at `t_stop`.
#[allow(clippy::too_many_arguments)]
fn integrate_piece<E>(
    equation: &E,
    y_start: &[f64],
    t_start: T,
    t_stop: T,
    breakpoint: Option<T>,
    times: &[f64],
    config: &IntegratorConfig,
    data: &mut Vec<f64>,
) -> Result<Vec<f64>, LipidsolError>
where
    E: Equation + Clone + 'static,
{
    let nstates = y_start.len();
    let nonnegative = config.nonnegative;
    let t_limit = breakpoint.map(just_below).unwrap_or(T::INFINITY);

    let rhs_eq = equation.clone();
    let jac_eq = equation.clone();
    let init = V::from_column_slice(y_start);

    let problem = OdeBuilder::<M>::new()
        .t0(t_start)
        .h0(config.h0)
        .rtol(config.rtol)
        .atol(vec![config.atol; nstates])
        .rhs_implicit(
            move |x: &V, _p: &V, t: T, y: &mut V| {
                rhs(&rhs_eq, nonnegative, x, t.min(t_limit), y)
            },
            move |x: &V, _p: &V, t: T, v: &V, y: &mut V| {
                jac_mul(&jac_eq, nonnegative, x, t.min(t_limit), v, y)
            },
        )
        .init(move |_p: &V, _t: T| init.clone())
        .build()?;

    let mut solver = problem.bdf::<LS>()?;

    let targets = times.iter().copied().chain(std::iter::once(t_stop));
    for (index, time) in targets.enumerate() {
        if time > solver.state().t {
            solver.set_stop_time(time)?;
            loop {
                match solver.step() {
                    Ok(OdeSolverStopReason::InternalTimestep) => continue,
                    Ok(OdeSolverStopReason::TstopReached) => break,
                    Ok(OdeSolverStopReason::RootFound(_)) => continue,
                    Err(DiffsolError::OdeSolverError(OdeSolverError::StepSizeTooSmall {
                        ..
                    })) => {
                        return Err(LipidsolError::StepSizeTooSmall {
                            time: solver.state().t,
                        });
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }
        let y = solver.state().y;
        if let Some(component) = y.iter().position(|v| !v.is_finite()) {
            return Err(LipidsolError::NonFiniteState { time, component });
        }
        if index < times.len() {
            data.extend(y.iter().copied());
        }
    }

    Ok(solver.state().y.iter().copied().collect())
}
