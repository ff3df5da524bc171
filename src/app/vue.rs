// src/app/vue.rs
//
// Vue (terminal) — boucle ligne à ligne
// -------------------------------------
// - une ligne sans ":" = expression saisie puis "=" (Entrée évalue)
// - une ligne vide (ou ":=") = "=" sur l’entrée en cours (construite par :ins, :pi, :mr…)
// - une ligne ":commande" = bouton (mémoire, historique, insertion, etc.)
// - rendu en texte pur : la boucle d’E/S vit dans main.rs

use super::etat::AppCalc;

pub const AIDE: &str = "\
Expressions : 2+3*4, (2+3)*4, sqrt(16), ln(e), log(100), 2^10, pi, e
Commandes :
  (ligne vide)  :=  évalue l’entrée en cours et l’archive
  :etapes          active/désactive la démarche pas à pas
  :pi  :e          insère la constante (multiplication implicite)
  :ins <texte>     insère du texte au curseur
  :del  :c         efface un caractère / toute l’entrée
  :mc  :mr  :m+    mémoire : remise à zéro, rappel, ajout
  :hist            historique (plus récent en tête)
  :rappel <id>     recharge une expression archivée
  :suppr <id>      supprime une entrée d’historique
  :vider           vide l’historique
  :copier          affiche le résultat copiable
  :aide  :q        aide, quitter";

#[derive(Clone, Debug, PartialEq)]
pub enum Commande {
    Calculer(String),
    Egal,
    Etapes,
    Inserer(String),
    Supprimer,
    Effacer,
    MemoireEffacer,
    MemoireRappel,
    MemoireAjouter,
    Historique,
    Rappeler(u64),
    SupprimerHistorique(u64),
    ViderHistorique,
    Copier,
    Aide,
    Quitter,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Sortie {
    Afficher(String),
    /// L’historique a changé : le collaborateur doit le sauvegarder.
    AfficherEtSauver(String),
    Quitter,
}

impl Commande {
    pub fn analyser(ligne: &str) -> Result<Commande, String> {
        let ligne = ligne.trim();
        if ligne.is_empty() {
            return Ok(Commande::Egal);
        }
        let Some(cmd) = ligne.strip_prefix(':') else {
            return Ok(Commande::Calculer(ligne.to_string()));
        };

        let (nom, arg) = match cmd.split_once(char::is_whitespace) {
            Some((n, a)) => (n, a.trim()),
            None => (cmd, ""),
        };

        let id = || -> Result<u64, String> {
            arg.parse::<u64>()
                .map_err(|_| format!("identifiant invalide : « {arg} »"))
        };

        match nom {
            "=" => Ok(Commande::Egal),
            "etapes" => Ok(Commande::Etapes),
            "pi" => Ok(Commande::Inserer("pi".into())),
            "e" => Ok(Commande::Inserer("e".into())),
            "ins" if !arg.is_empty() => Ok(Commande::Inserer(arg.to_string())),
            "del" => Ok(Commande::Supprimer),
            "c" => Ok(Commande::Effacer),
            "mc" => Ok(Commande::MemoireEffacer),
            "mr" => Ok(Commande::MemoireRappel),
            "m+" => Ok(Commande::MemoireAjouter),
            "hist" => Ok(Commande::Historique),
            "rappel" => Ok(Commande::Rappeler(id()?)),
            "suppr" => Ok(Commande::SupprimerHistorique(id()?)),
            "vider" => Ok(Commande::ViderHistorique),
            "copier" => Ok(Commande::Copier),
            "aide" | "h" => Ok(Commande::Aide),
            "q" | "quitter" => Ok(Commande::Quitter),
            _ => Err(format!("commande inconnue : « :{cmd} » (voir :aide)")),
        }
    }
}

impl AppCalc {
    /// Exécute une ligne saisie et retourne le texte à afficher.
    pub fn executer(&mut self, ligne: &str) -> Sortie {
        let commande = match Commande::analyser(ligne) {
            Ok(c) => c,
            Err(msg) => return Sortie::Afficher(msg),
        };

        match commande {
            Commande::Calculer(expr) => {
                self.saisir(&expr);
                self.egal()
            }
            Commande::Egal => self.egal(),
            Commande::Etapes => {
                self.mode_etapes = !self.mode_etapes;
                let etat = if self.mode_etapes { "activée" } else { "désactivée" };
                Sortie::Afficher(format!("démarche pas à pas {etat}"))
            }
            Commande::Inserer(v) => {
                self.inserer(&v);
                Sortie::Afficher(self.rendu_saisie())
            }
            Commande::Supprimer => {
                self.supprimer();
                Sortie::Afficher(self.rendu_saisie())
            }
            Commande::Effacer => {
                self.effacer();
                Sortie::Afficher(self.rendu_saisie())
            }
            Commande::MemoireEffacer => {
                self.memoire_effacer();
                Sortie::Afficher("M = 0".into())
            }
            Commande::MemoireRappel => {
                self.memoire_rappel();
                Sortie::Afficher(self.rendu_saisie())
            }
            Commande::MemoireAjouter => {
                self.memoire_ajouter();
                Sortie::Afficher(format!("M = {}", crate::noyau::formater(self.memoire)))
            }
            Commande::Historique => Sortie::Afficher(self.rendu_historique()),
            Commande::Rappeler(id) => {
                if self.rappeler(id) {
                    Sortie::Afficher(self.rendu_saisie())
                } else {
                    Sortie::Afficher(format!("aucune entrée d’historique #{id}"))
                }
            }
            Commande::SupprimerHistorique(id) => {
                if self.historique.supprimer(id) {
                    Sortie::AfficherEtSauver(format!("entrée #{id} supprimée"))
                } else {
                    Sortie::Afficher(format!("aucune entrée d’historique #{id}"))
                }
            }
            Commande::ViderHistorique => {
                self.historique.vider();
                Sortie::AfficherEtSauver("historique vidé".into())
            }
            Commande::Copier => match self.resultat_copiable() {
                Some(r) => Sortie::Afficher(r.to_string()),
                None => Sortie::Afficher("rien à copier".into()),
            },
            Commande::Aide => Sortie::Afficher(AIDE.to_string()),
            Commande::Quitter => Sortie::Quitter,
        }
    }

    fn egal(&mut self) -> Sortie {
        if self.calculer().is_some() {
            Sortie::AfficherEtSauver(self.rendu())
        } else {
            Sortie::Afficher(self.rendu())
        }
    }

    /// Résultat (+ démarche ou message d’erreur).
    pub fn rendu(&self) -> String {
        let mut out = format!("= {}", self.affichage);
        if !self.explication.is_empty() {
            out.push('\n');
            out.push_str(&self.explication);
        }
        out
    }

    /// Entrée en cours avec le curseur, puis l’aperçu du résultat.
    pub fn rendu_saisie(&self) -> String {
        let avant: String = self.entree.chars().take(self.curseur()).collect();
        let apres: String = self.entree.chars().skip(self.curseur()).collect();
        format!("> {avant}|{apres}\n{}", self.rendu())
    }

    pub fn rendu_historique(&self) -> String {
        if self.historique.is_empty() {
            return "Aucun calcul pour l’instant".to_string();
        }
        self.historique
            .entrees()
            .iter()
            .map(|e| format!("#{:<4} {} = {}", e.id, e.expression, e.resultat))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyse_des_commandes() {
        assert_eq!(
            Commande::analyser(" 1+1 "),
            Ok(Commande::Calculer("1+1".into()))
        );
        assert_eq!(Commande::analyser(":m+"), Ok(Commande::MemoireAjouter));
        assert_eq!(Commande::analyser(":rappel 3"), Ok(Commande::Rappeler(3)));
        assert_eq!(
            Commande::analyser(":ins sqrt("),
            Ok(Commande::Inserer("sqrt(".into()))
        );
        assert_eq!(Commande::analyser("  "), Ok(Commande::Egal));
        assert_eq!(Commande::analyser(":="), Ok(Commande::Egal));
        assert!(Commande::analyser(":rappel x").is_err());
        assert!(Commande::analyser(":inconnue").is_err());
    }

    #[test]
    fn session_complete() {
        let mut c = AppCalc::default();

        assert_eq!(
            c.executer("(2+3)*4"),
            Sortie::AfficherEtSauver("= 20".into())
        );
        assert_eq!(c.executer("2/0"), Sortie::Afficher(
            "= Error\nErreur mathématique : division par zéro".into()
        ));

        // l'entrée fautive est conservée : on repart d'une entrée vide
        c.executer(":c");
        c.executer(":ins 2");
        assert_eq!(c.executer(":pi"), Sortie::Afficher("> 2*pi|\n= 6.2831853072".into()));

        assert_eq!(c.executer(":hist"), Sortie::Afficher("#1    (2+3)*4 = 20".into()));
        assert_eq!(c.executer(":vider"), Sortie::AfficherEtSauver("historique vidé".into()));
        assert_eq!(c.executer(":q"), Sortie::Quitter);
    }

    #[test]
    fn egal_sur_une_entree_construite_par_commandes() {
        let mut c = AppCalc::default();
        c.executer(":ins 2");
        c.executer(":pi");
        assert_eq!(c.executer(""), Sortie::AfficherEtSauver("= 6.2831853072".into()));
        assert_eq!(c.executer(":hist"), Sortie::Afficher("#1    2*pi = 6.2831853072".into()));
        assert!(c.entree.is_empty());

        // entrée vide : rien à archiver
        assert_eq!(c.executer(":="), Sortie::Afficher("= 6.2831853072".into()));
        assert_eq!(c.historique.len(), 1);
    }

    #[test]
    fn etapes_dans_le_rendu() {
        let mut c = AppCalc::default();
        c.executer(":etapes");
        match c.executer("(2+3)*4") {
            Sortie::AfficherEtSauver(s) => {
                assert!(s.starts_with("= 20\nInput: (2+3)*4"));
                assert!(s.ends_with("Final Result: 20"));
            }
            autre => panic!("sortie inattendue : {autre:?}"),
        }
    }
}
