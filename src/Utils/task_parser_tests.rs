/////////////////////////////TESTS////////////////////////////////////////////////////
/*
tests:
pieces of the grammar
full task document with defaults
comments and blank lines
malformed and incomplete documents
file-based loading
solving the parsed tasks
*/

#[cfg(test)]
mod tests {
    use crate::Examples::quadrature_examples::{CatalogFunction, FunctionCatalog};
    use crate::Utils::task_parser::{
        Value, is_integral_title, load_task_file, parse_document, parse_key, parse_task_document,
        parse_title, parse_value, parse_value_list,
    };
    use crate::numerical::Newton_Cotes::Reimann_sum::{QuadratureRule, SolutionType};
    use crate::numerical::Newton_Cotes::interval::Bounds;
    use crate::numerical::Newton_Cotes::quadrature_errors::QuadratureError;
    use approx::assert_relative_eq;
    use std::fs;
    use tempfile::tempdir;

    const FULL_DOCUMENT: &str = "
// two integrals and settings
integral
function: sin_div_x
bounds: -1.0, 1.0
accuracy: 1e-4
rule: trapezoidal
solution: runge

integral2
function: polynomial
bounds: -1, 1
accuracy: 0.0001
rule: midpoint
solution: formulas

# engine guardrails
settings
loglevel: warn
max_sections: 100000000
max_value: 1e30
";

    #[test]
    fn test_parse_title_and_key() {
        let (remaining, title) = parse_title("integral2\n function: linear").unwrap();
        assert_eq!(title, "integral2");
        assert_eq!(remaining, "function: linear");

        let (remaining, key) = parse_key("max_sections: 10").unwrap();
        assert_eq!(key, "max_sections");
        assert_eq!(remaining, ": 10");
    }

    #[test]
    fn test_parse_values() {
        let (remaining, value) = parse_value("sin_div_x\nbounds").unwrap();
        assert_eq!(value, Value::String("sin_div_x".to_string()));
        assert_eq!(remaining, "\nbounds");

        let (_, value) = parse_value("1e-4").unwrap();
        assert_eq!(value, Value::Float(1e-4));
        let (_, value) = parse_value("100000000").unwrap();
        assert_eq!(value, Value::Integer(100_000_000));
        let (_, value) = parse_value("true").unwrap();
        assert_eq!(value, Value::Boolean(true));

        let (remaining, values) = parse_value_list("-1.0 ,  2\nnext").unwrap();
        assert_eq!(values, vec![Value::Float(-1.0), Value::Integer(2)]);
        assert_eq!(remaining, "\nnext");
        assert_eq!(values[1].as_number(), Some(2.0));
    }

    #[test]
    fn test_parse_document_keeps_order() {
        let (remaining, sections) =
            parse_document("integral2 function: linear\nintegral function: sqrt").unwrap();
        assert!(remaining.is_empty());
        let titles: Vec<&str> = sections.iter().map(|(title, _)| title.as_str()).collect();
        assert_eq!(titles, vec!["integral2", "integral"]);
        assert_eq!(sections[0].1[0].0, "function");
    }

    #[test]
    fn test_integral_titles() {
        assert!(is_integral_title("integral"));
        assert!(is_integral_title("integral2"));
        assert!(is_integral_title("integral_10"));
        assert!(!is_integral_title("integrals"));
        assert!(!is_integral_title("settings"));
    }

    #[test]
    fn test_full_document() {
        let document = parse_task_document(FULL_DOCUMENT).unwrap();
        assert_eq!(document.tasks.len(), 2);

        let first = &document.tasks[0];
        assert_eq!(first.title, "integral");
        assert_eq!(first.function, CatalogFunction::SinDivX);
        assert_eq!(first.bounds, Bounds::new(-1.0, 1.0));
        assert_eq!(first.accuracy, 1e-4);
        assert_eq!(first.rule, QuadratureRule::Trapezoidal);
        assert_eq!(first.solution, SolutionType::Runge);

        let second = &document.tasks[1];
        assert_eq!(second.function, CatalogFunction::Polynomial);
        assert_eq!(second.rule, QuadratureRule::Midpoint);
        assert_eq!(second.solution, SolutionType::Formulas);

        assert_eq!(document.settings.loglevel, "warn");
        assert_eq!(document.settings.log_file, None);
        assert_eq!(document.settings.quadrature.max_sections, 100_000_000);
        assert_eq!(document.settings.quadrature.max_value, 1e30);
    }

    #[test]
    fn test_defaults() {
        let document =
            parse_task_document("integral\nfunction: 1\nbounds: 0, 2\naccuracy: 0.01").unwrap();
        let task = &document.tasks[0];
        assert_eq!(task.function, CatalogFunction::Linear);
        assert_eq!(task.rule, QuadratureRule::Trapezoidal);
        assert_eq!(task.solution, SolutionType::Runge);
        assert_eq!(document.settings.loglevel, "info");
        assert_eq!(document.settings.quadrature.max_sections, 100_000_000);
    }

    #[test]
    fn test_rule_by_index_and_log_file() {
        let document = parse_task_document(
            "integral\nfunction: linear\nbounds: 0, 1\naccuracy: 0.01\nrule: 4\n\
             settings\nlog_file: true\nloglevel: off",
        )
        .unwrap();
        assert_eq!(document.tasks[0].rule, QuadratureRule::Simpson);
        let log_file = document.settings.log_file.clone().unwrap();
        assert!(log_file.starts_with("log_"));
        assert_eq!(document.settings.loglevel, "off");
    }

    #[test]
    fn test_malformed_documents() {
        let cases = [
            ("", "empty"),
            ("// only a comment\n\n", "empty"),
            ("integral\nbounds: 0, 1\naccuracy: 0.1", "'function' is missing"),
            ("integral\nfunction: linear\naccuracy: 0.1", "'bounds' is missing"),
            ("integral\nfunction: linear\nbounds: 0, 1", "'accuracy' is missing"),
            ("integral\nfunction: cosh\nbounds: 0, 1\naccuracy: 0.1", "unknown function"),
            ("integral\nfunction: linear\nbounds: 0\naccuracy: 0.1", "two numbers"),
            ("integral\nfunction: linear\nbounds: 0, 1\naccuracy: 1e-7", "less than"),
            ("integral\nfunction: linear\nbounds: 0, 1\naccuracy: 0.1\nstep: 2", "unknown key"),
            ("integral\nfunction: linear\nbounds: 0, 1\naccuracy: 0.1\nrule: gauss", "gauss"),
            ("integral\nfunction: linear\nbounds: 0, 1\naccuracy: 0.1\nsolution: exact", "unknown solution"),
            ("integral\nfunction: linear\nbounds: 0, 1\naccuracy: 0.1\nintegral\nfunction: sqrt", "defined twice"),
            ("plot\nfunction: linear", "unknown section"),
            ("settings\nloglevel: info", "no integral sections"),
            ("integral\nfunction: linear\nbounds: 0, 1\naccuracy: 0.1\nsettings\nloglevel: loud", "loglevel"),
            ("integral\nfunction: linear\nbounds: 0, 1\naccuracy: 0.1\nsettings\nmax_sections: -5", "max_sections"),
        ];
        for (document, reason) in cases {
            let err = parse_task_document(document).unwrap_err();
            assert!(err.contains(reason), "'{}' gave '{}'", document, err);
        }
    }

    #[test]
    fn test_load_task_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        fs::write(&path, FULL_DOCUMENT).unwrap();
        let document = load_task_file(&path).unwrap();
        assert_eq!(document.tasks.len(), 2);

        let missing = dir.path().join("missing.txt");
        assert!(load_task_file(&missing).unwrap_err().contains("can't read task file"));
    }

    #[test]
    fn test_solve_tasks() {
        let document = parse_task_document(FULL_DOCUMENT).unwrap();
        let engine = document.engine();
        let catalog = FunctionCatalog::new();

        let answer = document.tasks[0].solve(&engine, &catalog).unwrap();
        assert_relative_eq!(answer.value(), 1.892166140734366, epsilon = 1e-3);

        let answer = document.tasks[1].solve(&engine, &catalog).unwrap();
        assert_relative_eq!(answer.value(), 0.04 + 0.4 / 3.0 - 14.0, epsilon = 1e-3);
        assert!(!answer.has_measurement_error());
    }

    #[test]
    fn test_guardrails_from_settings() {
        let document = parse_task_document(
            "integral\nfunction: hyperbola\nbounds: 1e-6, 1\naccuracy: 1e-6\n\
             settings\nmax_sections: 64\nloglevel: off",
        )
        .unwrap();
        let answer = document.tasks[0].solve(&document.engine(), &FunctionCatalog::new());
        assert!(matches!(
            answer,
            Err(QuadratureError::NotSolvableIntegral { sections: 128, .. })
        ));
    }
}
