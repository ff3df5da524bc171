// src/noyau/nombre.rs
//
// Union numérique fermée : un réel fini, ou un cas spécial IEEE.
// L'évaluateur ne rend que des Reel (les spéciaux deviennent ErreurCalcul::Math),
// mais le formateur doit savoir afficher les trois cas spéciaux.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Special {
    NaN,
    PlusInfini,
    MoinsInfini,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nombre {
    Reel(f64),
    Special(Special),
}

impl Nombre {
    pub fn est_fini(&self) -> bool {
        matches!(self, Nombre::Reel(_))
    }

    /// Retour vers f64 (NaN / ±inf pour les spéciaux).
    pub fn en_f64(self) -> f64 {
        match self {
            Nombre::Reel(v) => v,
            Nombre::Special(Special::NaN) => f64::NAN,
            Nombre::Special(Special::PlusInfini) => f64::INFINITY,
            Nombre::Special(Special::MoinsInfini) => f64::NEG_INFINITY,
        }
    }
}

impl From<f64> for Nombre {
    fn from(v: f64) -> Self {
        if v.is_nan() {
            Nombre::Special(Special::NaN)
        } else if v == f64::INFINITY {
            Nombre::Special(Special::PlusInfini)
        } else if v == f64::NEG_INFINITY {
            Nombre::Special(Special::MoinsInfini)
        } else {
            Nombre::Reel(v)
        }
    }
}
