use std::{
    fs, io,
    path::{Path, PathBuf},
};

use funnel_spec::{
    CombineMode, Criteria, FormDefinition, Identity, Question, QuestionKind, QuestionOption,
    export_file_name, slugify,
    spec::{Colors, Customization, Destinations},
};

const STARTER_PRIMARY: &str = "#3b82f6";
const STARTER_SECONDARY: &str = "#fbbf24";

/// Build the starter definition `funnel init` writes for a new company.
pub fn starter_definition(company_name: &str) -> Result<FormDefinition, String> {
    let company_name = company_name.trim();
    if company_name.is_empty() {
        return Err("company name cannot be empty".into());
    }
    let slug = slugify(company_name);
    if slug.is_empty() {
        return Err(format!(
            "company name '{}' does not produce a usable slug",
            company_name
        ));
    }

    Ok(FormDefinition {
        identity: Identity {
            company_name: company_name.to_string(),
            slug,
            logo: None,
            colors: Colors {
                primary: STARTER_PRIMARY.into(),
                secondary: STARTER_SECONDARY.into(),
            },
            customization: Customization {
                page_title: "Simulador Solar".into(),
                hero_title: "Economize até 95% na conta de luz".into(),
                hero_subtitle: "Solicite agora uma análise gratuita".into(),
                benefits: String::new(),
            },
        },
        questions: starter_questions(),
        qualification_criteria: Criteria {
            rules: Vec::new(),
            logic: CombineMode::All,
        },
        destinations: Destinations::default(),
    })
}

fn starter_questions() -> Vec<Question> {
    vec![
        input("name", QuestionKind::ShortText, "Qual o seu nome?", "Digite seu nome", 0),
        input("whatsapp", QuestionKind::Phone, "Seu WhatsApp", "(00) 00000-0000", 1),
        input("email", QuestionKind::Email, "Seu e-mail", "seuemail@exemplo.com", 2),
        choice(
            "location",
            "Qual sua localidade?",
            3,
            "opt",
            &[("São Paulo/SP", "São Paulo/SP"), ("Outra", "Outra")],
        ),
        choice(
            "priority",
            "Qual seu nível de prioridade?",
            4,
            "prio",
            &[
                ("Comecei a pesquisar agora. Pouco urgente", "Baixa"),
                ("Estou fazendo cotações e pretendo me decidir em breve", "Média"),
                ("Tenho grande prioridade em começar a economizar", "Alta"),
            ],
        ),
        choice(
            "billValue",
            "Valor da conta de energia",
            5,
            "val",
            &[
                ("Até R$ 200", "Até R$ 200"),
                ("R$ 200 a R$ 400", "R$ 200 a R$ 400"),
                ("R$ 400 a R$ 600", "R$ 400 a R$ 600"),
                ("R$ 600 a R$ 800", "R$ 600 a R$ 800"),
                ("Acima de R$ 1.000", "Acima de R$ 1.000"),
            ],
        ),
    ]
}

// Contact fields are fixed: the editor never lets them be removed.
fn input(id: &str, kind: QuestionKind, label: &str, placeholder: &str, order: i64) -> Question {
    Question {
        id: id.into(),
        kind,
        label: label.into(),
        placeholder: Some(placeholder.into()),
        required: true,
        order,
        is_fixed: true,
        options: Vec::new(),
    }
}

fn choice(id: &str, label: &str, order: i64, prefix: &str, options: &[(&str, &str)]) -> Question {
    Question {
        id: id.into(),
        kind: QuestionKind::SingleChoiceList,
        label: label.into(),
        placeholder: None,
        required: true,
        order,
        is_fixed: false,
        options: options
            .iter()
            .enumerate()
            .map(|(index, (label, value))| QuestionOption {
                id: format!("{}-{}", prefix, index + 1),
                label: (*label).into(),
                value: (*value).into(),
            })
            .collect(),
    }
}

/// Where `funnel export` places the document for this definition.
pub fn export_path(definition: &FormDefinition, out_root: &Path) -> PathBuf {
    out_root.join(export_file_name(definition))
}

/// Write a compiled document into the output root, creating it when needed.
pub fn write_export(
    definition: &FormDefinition,
    html: &str,
    out_root: &Path,
) -> io::Result<PathBuf> {
    fs::create_dir_all(out_root)?;
    let path = export_path(definition, out_root);
    fs::write(&path, html)?;
    Ok(path)
}

/// Pretty JSON with a trailing newline, the shape `init` and `schema` emit.
pub fn to_pretty_json(value: &impl serde::Serialize) -> Result<String, serde_json::Error> {
    let mut contents = serde_json::to_string_pretty(value)?;
    contents.push('\n');
    Ok(contents)
}
