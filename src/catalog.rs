//! Static reference data: the per-goal template bank and the exercise ratio
//! table every prescribed load is derived from.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::models::{ExerciseTemplate, Lift, WorkoutTemplate};
use crate::types::{Category, Gender, Goal};

/// Ratio-table entry: the exercise is loaded at `ratio` × the 1RM of `base`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseRatio {
    pub key: &'static str,
    pub base: Lift,
    pub ratio: f64,
}

const fn r(key: &'static str, base: Lift, ratio: f64) -> ExerciseRatio {
    ExerciseRatio { key, base, ratio }
}

use Lift::{Bench, Deadlift, Squat};

/// Order matters: substring fallback takes the first key that matches.
pub static EXERCISE_RATIOS: &[ExerciseRatio] = &[
    r("Panca Piana", Bench, 1.0),
    r("Panca Piana Bilanciere", Bench, 1.0),
    r("SS: Panca Piana", Bench, 0.8),
    r("Spinte Manubri Inclinata", Bench, 0.7),
    r("Panca Inclinata Manubri", Bench, 0.7),
    r("Dip alle Parallele", Bench, 0.9),
    r("Dip", Bench, 0.9),
    r("Croci ai Cavi alti", Bench, 0.3),
    r("French Press Bil. EZ", Bench, 0.35),
    r("Pushdown Corda", Bench, 0.35),
    r("Pushdown", Bench, 0.35),
    r("SS: French Press", Bench, 0.3),
    r("Trazioni", Bench, 0.9),
    r("Trazioni (o Lat Machine)", Bench, 0.9),
    r("Rematore Bilanciere", Bench, 0.8),
    r("Rematore con Bilanciere", Bench, 0.8),
    r("SS: Rematore Bil.", Bench, 0.6),
    r("Pulley Basso", Bench, 0.7),
    r("Pulley Basso (presa stretta)", Bench, 0.7),
    r("Pull-over al cavo alto", Bench, 0.4),
    r("Curl Bilanciere", Bench, 0.4),
    r("Curl con Bilanciere", Bench, 0.4),
    r("Curl a Martello (Hammer)", Bench, 0.35),
    r("Hammer Curl", Bench, 0.35),
    r("Squat", Squat, 1.0),
    r("Squat con Bilanciere", Squat, 1.0),
    r("Leg Press", Squat, 1.5),
    r("Leg Press 45°", Squat, 1.5),
    r("Affondi Bulgari", Squat, 0.3),
    r("Leg Extension", Squat, 0.35),
    r("Calf Raise", Squat, 0.5),
    r("Calf Raise in piedi", Squat, 0.5),
    r("Military Press", Bench, 0.6),
    r("Military Press (in piedi)", Bench, 0.6),
    r("Shoulder Press", Bench, 0.6),
    r("Alzate Laterali", Bench, 0.15),
    r("Alzate Laterali Manubri", Bench, 0.15),
    r("Face Pull", Bench, 0.3),
    r("Face Pull (Cavi alti)", Bench, 0.3),
    r("Scrollate (Shrugs) Manubri", Deadlift, 0.6),
    r("Arnold Press", Bench, 0.4),
    r("Stacco Rumeno", Deadlift, 0.7),
    r("Stacco da Terra Rumeno", Deadlift, 0.7),
    r("Stacco Rumeno Manubri", Deadlift, 0.6),
    r("Hip Thrust", Deadlift, 1.0),
    r("Hip Thrust con Bilanciere", Deadlift, 1.0),
    r("Leg Curl", Squat, 0.3),
    r("Leg Curl Sdraiato", Squat, 0.3),
    r("Hyperextension", Deadlift, 0.2),
    r("Hyperextension (con peso)", Deadlift, 0.2),
    r("Stacco da Terra", Deadlift, 1.0),
    // Circuit variant, lighter than the straight lift.
    r("1. Stacco da terra", Deadlift, 0.8),
    r("Goblet Squat", Squat, 0.4),
    r("Affondi camminati", Squat, 0.25),
    r("Rematore Manubrio", Bench, 0.35),
    r("Kettlebell Swing", Deadlift, 0.3),
    r("Thruster (Squat + Press)", Bench, 0.45),
    r("Step Up", Squat, 0.3),
    r("Chest Press", Bench, 0.8),
    r("Chest Press Machine", Bench, 0.8),
    r("Lat Machine", Bench, 0.75),
    r("Lat Machine avanti", Bench, 0.75),
    r("Curl Bicipiti Cavi", Bench, 0.3),
];

fn ex(name: &str, reps: &str) -> ExerciseTemplate {
    ExerciseTemplate {
        name: name.to_string(),
        reps: reps.to_string(),
    }
}

fn tpl(id: &str, category: Category, title: &str, focus: &str, exercises: Vec<ExerciseTemplate>) -> WorkoutTemplate {
    WorkoutTemplate {
        id: id.to_string(),
        category,
        title: title.to_string(),
        focus: focus.to_string(),
        exercises,
    }
}

/// Five templates per goal.
pub type TemplateBank = HashMap<Goal, Vec<WorkoutTemplate>>;

static TEMPLATES: Lazy<TemplateBank> = Lazy::new(|| {
    use Category::*;

    HashMap::from([
        (
            Goal::Muscle,
            vec![
                tpl("t_m1", Massa, "Petto e Tricipiti", "Spinta e Tensione", vec![
                    ex("Panca Piana Bilanciere", "4 x 6-8"),
                    ex("Spinte Manubri Inclinata", "3 x 8-10"),
                    ex("Dip alle Parallele", "3 x 8-10"),
                    ex("Croci ai Cavi alti", "3 x 12-15"),
                    ex("French Press Bil. EZ", "4 x 8-10"),
                    ex("Pushdown Corda", "3 x 12-15"),
                ]),
                tpl("t_m2", Massa, "Dorso e Bicipiti", "Trazione e Spessore", vec![
                    ex("Trazioni (o Lat Machine)", "4 x 6-8"),
                    ex("Rematore con Bilanciere", "4 x 8-10"),
                    ex("Pulley Basso (presa stretta)", "3 x 10-12"),
                    ex("Pull-over al cavo alto", "3 x 15"),
                    ex("Curl con Bilanciere", "4 x 8-10"),
                    ex("Curl a Martello (Hammer)", "3 x 12"),
                ]),
                tpl("t_m3", Massa, "Gambe (Focus Quad)", "Volume Arti Inferiori", vec![
                    ex("Squat con Bilanciere", "4 x 6-8"),
                    ex("Leg Press 45°", "3 x 10-12"),
                    ex("Affondi Bulgari", "3 x 10/lato"),
                    ex("Leg Extension", "4 x 15"),
                    ex("Calf Raise in piedi", "4 x 15"),
                ]),
                tpl("t_m4", Massa, "Spalle & Richiamo Petto", "Deltoidi e Upper Chest", vec![
                    ex("Military Press (in piedi)", "4 x 6-8"),
                    ex("Alzate Laterali Manubri", "4 x 12-15"),
                    ex("Face Pull (Cavi alti)", "3 x 15"),
                    ex("Panca Inclinata Manubri", "3 x 10-12"),
                    ex("Scrollate (Shrugs) Manubri", "3 x 12"),
                ]),
                tpl("t_m5", Massa, "Gambe (Focus Posteriore)", "Femorali e Glutei", vec![
                    ex("Stacco da Terra Rumeno", "4 x 8"),
                    ex("Hip Thrust con Bilanciere", "4 x 10"),
                    ex("Leg Curl Sdraiato", "3 x 12"),
                    ex("Hyperextension (con peso)", "3 x 15"),
                    ex("Plank Addominale (zavorrato)", "3 x 60\""),
                ]),
            ],
        ),
        (
            Goal::Definition,
            vec![
                tpl("t_d1", Definizione, "Upper Body Supersets", "Densità Spinta/Trazione", vec![
                    ex("SS: Panca Piana + Rematore Bil.", "4 x 10+10"),
                    ex("SS: Military Press + Lat Machine", "3 x 12+12"),
                    ex("SS: Alzate Laterali + Face Pull", "3 x 15+15"),
                    ex("SS: French Press + Curl Bilanciere", "3 x 12+12"),
                ]),
                tpl("t_d2", Definizione, "Gambe Alta Intensità", "Gambe e Cardio", vec![
                    ex("Goblet Squat", "4 x 15"),
                    ex("SS: Affondi camminati + Leg Curl", "3 x 20+12"),
                    ex("SS: Leg Extension + Calf Press", "3 x 15+20"),
                    ex("Mountain Climbers", "4 x 30 sec"),
                ]),
                tpl("t_d3", Definizione, "Full Body Circuit A", "No Pausa (4 Giri)", vec![
                    ex("1. Stacco da terra", "10 reps"),
                    ex("2. Push Up", "Max reps"),
                    ex("3. Box Jump (o Step Up)", "15 reps"),
                    ex("4. Rematore Manubrio", "10 reps"),
                    ex("5. Plank", "45 sec"),
                ]),
                tpl("t_d4", Definizione, "Deltoidi e Braccia (Pumping)", "Volume Braccia e Spalle", vec![
                    ex("Arnold Press", "4 x 12"),
                    ex("Triset: Alzate Lat. + Front. + Post.", "3 x 10+10+10"),
                    ex("SS: Pushdown fune + Hammer Curl", "4 x 15+15"),
                    ex("Dip tra panche", "3 x Max"),
                ]),
                tpl("t_d5", Definizione, "Full Body Lattacido B", "Acido Lattico", vec![
                    ex("Leg Press", "4 x 20"),
                    ex("Chest Press Machine", "4 x 15"),
                    ex("Lat Machine Inversa", "4 x 15"),
                    ex("Crunch a terra", "4 x 20"),
                    ex("Burpees", "3 x 10"),
                ]),
            ],
        ),
        (
            Goal::WeightLoss,
            vec![
                tpl("t_w1", PerditaPeso, "PHA Basic", "Peripheral Heart Action", vec![
                    ex("Squat Libero", "4 x 15"),
                    ex("Military Press Manubri", "4 x 12"),
                    ex("Affondi Dietro", "3 x 12"),
                    ex("Lat Machine avanti", "3 x 12"),
                    ex("Crunch Bicicletta", "3 x 30\""),
                ]),
                tpl("t_w2", PerditaPeso, "Functional Fat Burn", "Metabolico Funzionale", vec![
                    ex("Kettlebell Swing", "5 x 20"),
                    ex("Thruster (Squat + Press)", "4 x 12"),
                    ex("Renegade Row", "4 x 8/lato"),
                    ex("Jumping Jacks", "4 x 60 sec"),
                ]),
                tpl("t_w3", PerditaPeso, "PHA Advanced", "Alta Intensità PHA", vec![
                    ex("Stacco Rumeno Manubri", "4 x 12"),
                    ex("Panca Piana Manubri", "4 x 12"),
                    ex("Step-Up su box", "3 x 15"),
                    ex("Pulley Basso", "3 x 15"),
                    ex("Plank Jacks", "3 x 40\""),
                ]),
                tpl("t_w4", PerditaPeso, "Cardio Complex (Barbell)", "Complex (No Pause)", vec![
                    ex("1. Stacco da terra", "8 reps"),
                    ex("2. Rematore", "8 reps"),
                    ex("3. Front Squat", "8 reps"),
                    ex("4. Military Press", "8 reps"),
                ]),
                tpl("t_w5", PerditaPeso, "Bodyweight HIIT", "30s Work / 15s Rest", vec![
                    ex("Burpees", "30 sec"),
                    ex("Squat Jump", "30 sec"),
                    ex("Push Up", "30 sec"),
                    ex("Sit Ups", "30 sec"),
                ]),
            ],
        ),
        (
            Goal::Endurance,
            vec![
                tpl("t_e1", Resistenza, "Upper Body Endurance", "Alte Ripetizioni", vec![
                    ex("Piegamenti (Push Up)", "3 x Max"),
                    ex("Lat Machine", "3 x 20-25"),
                    ex("Chest Press", "3 x 20-25"),
                    ex("Alzate Laterali", "3 x 30"),
                    ex("Curl Bicipiti Cavi", "3 x 30"),
                ]),
                tpl("t_e2", Resistenza, "Lower Body Endurance", "Resistenza Gambe", vec![
                    ex("Squat a corpo libero", "4 x 50"),
                    ex("Affondi camminati", "3 x 3 min"),
                    ex("Leg Extension", "3 x 30"),
                    ex("Leg Curl", "3 x 30"),
                    ex("Calf alla pressa", "3 x 50"),
                ]),
                tpl("t_e3", Resistenza, "Isometrica e Core", "Tenuta Statica", vec![
                    ex("Wall Sit (Sedia al muro)", "4 x Max"),
                    ex("Plank", "4 x Max"),
                    ex("Hollow Body Position", "4 x 45\""),
                    ex("Superman Hold (Lombari)", "4 x 45\""),
                ]),
                tpl("t_e4", Resistenza, "Circuito \"100 Reps\"", "Volume Totale", vec![
                    ex("Leg Press", "100 Totali"),
                    ex("Pulley Basso", "100 Totali"),
                    ex("Shoulder Press Macchina", "100 Totali"),
                ]),
                tpl("t_e5", Resistenza, "Cardio-Resistenza Mista", "Endurance Funzionale", vec![
                    ex("Vogatore", "3 x 500m"),
                    ex("Kettlebell Swing", "3 x 40"),
                    ex("Box Jump", "3 x 20"),
                    ex("Farmer Walk (Camminata con pesi)", "3 x 40m"),
                ]),
            ],
        ),
    ])
});

/// Template bank for `gender`. Both banks are currently the same content.
pub fn template_bank(gender: Gender) -> &'static TemplateBank {
    match gender {
        Gender::Male | Gender::Female | Gender::Other => &TEMPLATES,
    }
}
