//! Messages, statement and witness of the blinded inner-product argument

use pedersen_core::{
    random_scalar, CommitmentKey, GroupElement, InnerProduct, PedersenError, PedersenResult,
    Scalar, Vector,
};
use rand_core::{CryptoRng, RngCore};

/// Public commitments `Cx`, `Cy` to the vectors and `Cz` to their inner product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InnerProductStatement {
    /// `Cx = r*H + <x, G_vec>`
    pub cx: GroupElement,
    /// `Cy = s*H + <y, G_vec>`
    pub cy: GroupElement,
    /// `Cz = t*H + z*G`
    pub cz: GroupElement,
}

/// Vectors `x`, `y` and the blindings of the three commitments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerProductWitness {
    pub x: Vector<Scalar>,
    pub y: Vector<Scalar>,
    /// Blinding of `Cx`
    pub r: Scalar,
    /// Blinding of `Cy`
    pub s: Scalar,
    /// Blinding of `Cz`
    pub t: Scalar,
}

impl InnerProductWitness {
    pub fn new(x: Vector<Scalar>, y: Vector<Scalar>, r: Scalar, s: Scalar, t: Scalar) -> Self {
        Self { x, y, r, s, t }
    }

    /// Random length-`n` vectors under random blindings
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R, n: usize) -> Self {
        let x = Vector::random(rng, n);
        let y = Vector::random(rng, n);
        Self::new(x, y, random_scalar(rng), random_scalar(rng), random_scalar(rng))
    }

    /// The committed inner product `z = <x, y>`
    pub fn product(&self) -> PedersenResult<Scalar> {
        self.x.inner_product(&self.y)
    }

    /// Check both vectors match the key's length
    pub fn validate(&self, key: &CommitmentKey) -> PedersenResult<()> {
        if key.vector_length() == 0 {
            return Err(PedersenError::InvalidParameters(
                "vectors must be non-empty".to_string(),
            ));
        }
        key.g_vec.check_length(&self.x)?;
        key.g_vec.check_length(&self.y)
    }

    pub fn statement(&self, key: &CommitmentKey) -> PedersenResult<InnerProductStatement> {
        self.validate(key)?;
        Ok(InnerProductStatement {
            cx: key.commit_vector(&self.x, &self.r)?,
            cy: key.commit_vector(&self.y, &self.s)?,
            cz: key.commit_scalar(&self.product()?, &self.t),
        })
    }
}

/// Prover's first message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InnerProductCommitment {
    /// `Ad = rd*H + <dx, G_vec>`
    pub ad: GroupElement,
    /// `Bd = sd*H + <dy, G_vec>`
    pub bd: GroupElement,
    /// `C1 = t1*H + (<x, dy> + <y, dx>)*G`
    pub c1: GroupElement,
    /// `C0 = t0*H + <dx, dy>*G`
    pub c0: GroupElement,
}

/// Blinded openings revealed after the challenge `e`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerProductResponse {
    /// `e*x + dx`
    pub fx: Vector<Scalar>,
    /// `e*y + dy`
    pub fy: Vector<Scalar>,
    /// `e*r + rd`
    pub rx: Scalar,
    /// `e*s + sd`
    pub sy: Scalar,
    /// `e^2*t + e*t1 + t0`
    pub tz: Scalar,
}

/// One run of the argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerProductTranscript {
    pub commitment: InnerProductCommitment,
    pub challenge: Scalar,
    pub response: InnerProductResponse,
}

/// Outcome of each verification equation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InnerProductChecks {
    /// `Cx*e + Ad == rx*H + <fx, G_vec>`
    pub x_opening: bool,
    /// `Cy*e + Bd == sy*H + <fy, G_vec>`
    pub y_opening: bool,
    /// `tz*H + <fx, fy>*G == Cz*e^2 + C1*e + C0`
    pub product: bool,
}

impl InnerProductChecks {
    pub fn all(&self) -> bool {
        self.x_opening && self.y_opening && self.product
    }

    /// Name of the first failing check
    pub fn first_failure(&self) -> Option<&'static str> {
        if !self.x_opening {
            Some("x opening")
        } else if !self.y_opening {
            Some("y opening")
        } else if !self.product {
            Some("inner product")
        } else {
            None
        }
    }
}
