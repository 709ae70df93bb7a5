use serde::Serialize;

use super::domain::Tier;
use super::evaluation::{CreditDecision, EvaluationResult, Offer, RiskProfile, ScoreFactor};

/// Boundary JSON shape consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationView {
    pub approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivo_rechazo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errores: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perfil_riesgo: Option<RiskProfileView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oferta_credito: Option<OfferView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskProfileView {
    pub perfil: Tier,
    pub score_total: u16,
    pub factores: Vec<ScoreFactor>,
    pub ratio_deuda_ingreso: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferView {
    pub monto_aprobado: f64,
    pub tasa_anual: f64,
    pub plazo_meses: u32,
    pub pago_mensual: f64,
    pub total_a_pagar: f64,
    pub intereses_totales: f64,
}

impl From<&RiskProfile> for RiskProfileView {
    fn from(risk: &RiskProfile) -> Self {
        Self {
            perfil: risk.tier,
            score_total: risk.score,
            factores: risk.factors.clone(),
            ratio_deuda_ingreso: risk.debt_to_income_ratio,
        }
    }
}

impl From<&Offer> for OfferView {
    fn from(offer: &Offer) -> Self {
        Self {
            monto_aprobado: offer.amount,
            tasa_anual: offer.annual_rate,
            plazo_meses: offer.term_months,
            pago_mensual: offer.monthly_payment,
            total_a_pagar: offer.total_paid,
            intereses_totales: offer.total_interest,
        }
    }
}

impl From<&EvaluationResult> for EvaluationView {
    fn from(result: &EvaluationResult) -> Self {
        let perfil_riesgo = result.risk.as_ref().map(RiskProfileView::from);

        match &result.decision {
            CreditDecision::Approved(offer) => Self {
                approved: true,
                motivo_rechazo: None,
                errores: None,
                perfil_riesgo,
                oferta_credito: Some(OfferView::from(offer)),
            },
            CreditDecision::Declined(reason) => {
                let violations = reason.violations();
                let errores: Option<Vec<String>> = (!violations.is_empty())
                    .then(|| violations.iter().map(|violation| violation.summary()).collect());
                Self {
                    approved: false,
                    motivo_rechazo: Some(reason.summary()),
                    errores,
                    perfil_riesgo,
                    oferta_credito: None,
                }
            }
        }
    }
}

impl EvaluationResult {
    pub fn view(&self) -> EvaluationView {
        EvaluationView::from(self)
    }
}
