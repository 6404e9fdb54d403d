use serde::{Deserialize, Serialize};

/// Immutable catalog entry. Defined at startup, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub label: String,
    pub duration_minutes: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,
    pub reimbursable: bool,
    pub details: Vec<String>,
}

impl Service {
    fn new(id: &str, label: &str, duration_minutes: i32, details: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            duration_minutes,
            price_cents: None,
            reimbursable: true,
            details: details.iter().map(|d| d.to_string()).collect(),
        }
    }

    fn with_price(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self.reimbursable = false;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCatalog {
    pub services: Vec<Service>,
}

impl ServiceCatalog {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    pub fn get(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }
}

impl Default for ServiceCatalog {
    /// The clinic's service list. Only cupping carries a price and is not
    /// covered by insurance; everything else is a standard 30-minute session.
    fn default() -> Self {
        Self::new(vec![
            Service::new(
                "classique",
                "Kinésithérapie classique",
                30,
                &[
                    "Douleurs musculo-squelettiques",
                    "Mobilité & posture",
                    "Exercices personnalisés",
                ],
            ),
            Service::new(
                "sport",
                "Kinésithérapie du sport",
                30,
                &[
                    "Prévention des blessures",
                    "Récupération et retour au sport",
                    "Renforcement spécifique",
                ],
            ),
            Service::new(
                "neuro",
                "Kinésithérapie neurologique",
                30,
                &[
                    "AVC, SEP, Parkinson",
                    "Équilibre, marche",
                    "Rééducation fonctionnelle",
                ],
            ),
            Service::new(
                "respi",
                "Kinésithérapie respiratoire",
                30,
                &[
                    "Exercices respiratoires",
                    "Drainage bronchique",
                    "Éducation thérapeutique",
                ],
            ),
            Service::new(
                "cupping",
                "Cupping (50 € — non remboursable)",
                45,
                &[
                    "Ventouses thérapeutiques",
                    "Relâchement myofascial",
                    "Amélioration de la circulation",
                ],
            )
            .with_price(5000),
            Service::new(
                "autre",
                "Autre",
                30,
                &[
                    "Besoin spécifique",
                    "Évaluation et orientation",
                    "Plan de soins adapté",
                ],
            ),
        ])
    }
}
