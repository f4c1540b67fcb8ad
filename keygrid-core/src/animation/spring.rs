/// Stiffness/damping pair shared by every spring of a simulation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 0.15,
            damping: 0.75,
        }
    }
}

impl SpringParams {
    /// Per-tick amplitude decay factor `|(1 - k) * d|` of the error term.
    pub fn decay_factor(self) -> f64 {
        ((1.0 - self.stiffness) * self.damping).abs()
    }
}

/// Anything advanced once per frame and read back as a scalar.
pub trait Animatable {
    fn update(&mut self);
    fn get(&self) -> f64;
}

/// A single animated scalar chasing its target.
///
/// `value` only moves through [`ScalarSpring::update`]; the target is never
/// clamped here, and the value may overshoot a range transiently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalarSpring {
    value: f64,
    velocity: f64,
    target: f64,
    params: SpringParams,
}

impl ScalarSpring {
    pub fn new(value: f64, params: SpringParams) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            params,
        }
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn params(&self) -> SpringParams {
        self.params
    }

    /// Semi-implicit Euler step with exponential damping.
    pub fn step(&mut self) {
        let force = (self.target - self.value) * self.params.stiffness;
        self.velocity = (self.velocity + force) * self.params.damping;
        self.value += self.velocity;
    }

    pub fn is_settled(&self, eps: f64) -> bool {
        (self.target - self.value).abs() <= eps && self.velocity.abs() <= eps
    }
}

impl Animatable for ScalarSpring {
    fn update(&mut self) {
        self.step();
    }

    fn get(&self) -> f64 {
        self.value
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
