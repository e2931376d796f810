//! Interactive menu: choose a function from the catalog, enter bounds and accuracy, get the
//! integral by the trapezoidal rule with Runge refinement.
use crate::Examples::quadrature_examples::{CatalogFunction, FunctionCatalog};
use crate::numerical::Newton_Cotes::Reimann_sum::{MIN_ACCURACY, ReimannSum};
use crate::numerical::Newton_Cotes::interval::Bounds;
use log::{info, warn};
use std::io::{self, BufRead, Write};

const START_MESSAGE: &str =
    "Hello!\nThis program calculates the integrals by the trapezoid method.";
const EXIT_MESSAGE: &str = "Good bye!!!";
const ASK_FOR_BOUNDS: &str = "Enter the integration limits '<start_bound> <end_bound>' ('start_bound' can be more than 'end_bound'): ";
const ASK_FOR_ACCURACY: &str = "Enter the accuracy. It should be more than 0.000001: ";

enum Command {
    Choose(CatalogFunction),
    Help,
    Exit,
    Bad,
}

impl Command {
    fn parse(line: &str) -> Command {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["c" | "choose", number] => number
                .parse::<usize>()
                .ok()
                .and_then(CatalogFunction::from_number)
                .map_or(Command::Bad, Command::Choose),
            ["h" | "help"] => Command::Help,
            ["e" | "exit"] => Command::Exit,
            _ => Command::Bad,
        }
    }
}

/// Menu over any input/output pair; prompts and answers go to `out`, complaints to `err`.
pub struct QuadratureRepl<R: BufRead, W: Write, E: Write> {
    input: R,
    out: W,
    err: E,
    catalog: FunctionCatalog,
    engine: ReimannSum,
}

impl<R: BufRead, W: Write, E: Write> QuadratureRepl<R, W, E> {
    pub fn new(input: R, out: W, err: E) -> Self {
        Self {
            input,
            out,
            err,
            catalog: FunctionCatalog::new(),
            engine: ReimannSum::new(),
        }
    }

    pub fn with_engine(mut self, engine: ReimannSum) -> Self {
        self.engine = engine;
        self
    }

    fn help_message(&self) -> String {
        format!(
            "Supported Commands:\n\
             Use 'choose <number of function>' to select function\n\
             Use 'exit' to quit\n\
             Use 'help' to see this text\n\
             Supported Functions:\n{}",
            self.catalog.describe()
        )
    }

    /// None when the input is exhausted
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn print_bad_command(&mut self) -> io::Result<()> {
        writeln!(self.err, "Bad command!!!\nTry again!")?;
        writeln!(self.out, "Use 'help' to get list of commands.")
    }

    fn print_incorrect_input(&mut self) -> io::Result<()> {
        writeln!(self.err, "Incorrect input!!!\nTry again!")
    }

    /// Main loop. Returns when the user exits or the input ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", START_MESSAGE)?;
        loop {
            let help = self.help_message();
            writeln!(self.out, "{}", help)?;
            self.out.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };
            match Command::parse(&line) {
                Command::Choose(kind) => {
                    if !self.solve(kind)? {
                        break;
                    }
                }
                Command::Help => writeln!(self.out, "{}", help)?,
                Command::Exit => {
                    writeln!(self.out, "{}", EXIT_MESSAGE)?;
                    break;
                }
                Command::Bad => self.print_bad_command()?,
            }
        }
        self.out.flush()
    }

    /// one integration; false if the input ended in the middle of the dialog
    fn solve(&mut self, kind: CatalogFunction) -> io::Result<bool> {
        let function = self.catalog.get(kind);
        writeln!(self.out, "You choose function {}", function.name())?;

        let Some(bounds) = self.ask_bounds(kind)? else {
            return Ok(false);
        };
        let Some(accuracy) = self.ask_accuracy()? else {
            return Ok(false);
        };

        info!(
            "integrating {} over [{}; {}] with accuracy {}",
            function.name(),
            bounds.left(),
            bounds.right(),
            accuracy
        );
        match self.engine.integrate(function.as_ref(), &bounds, accuracy) {
            Ok(answer) => writeln!(self.out, "{}", answer)?,
            Err(err) => {
                warn!("{}", err);
                writeln!(self.err, "{}", err.user_message())?;
            }
        }
        self.err.flush()?;
        Ok(true)
    }

    fn ask_bounds(&mut self, kind: CatalogFunction) -> io::Result<Option<Bounds>> {
        loop {
            writeln!(self.out, "{}", ASK_FOR_BOUNDS)?;
            self.out.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match parse_bounds(&line) {
                Some(bounds) => return Ok(Some(kind.adjust_bounds(bounds))),
                None => self.print_incorrect_input()?,
            }
        }
    }

    fn ask_accuracy(&mut self) -> io::Result<Option<f64>> {
        loop {
            writeln!(self.out, "{}", ASK_FOR_ACCURACY)?;
            self.out.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match parse_accuracy(&line) {
                Some(accuracy) => return Ok(Some(accuracy)),
                None => self.print_incorrect_input()?,
            }
        }
    }
}

/// "<start_bound> <end_bound>", both finite
pub fn parse_bounds(line: &str) -> Option<Bounds> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let [left, right] = words.as_slice() else {
        return None;
    };
    let left = left.parse::<f64>().ok().filter(|x| x.is_finite())?;
    let right = right.parse::<f64>().ok().filter(|x| x.is_finite())?;
    Some(Bounds::new(left, right))
}

/// single number not less than MIN_ACCURACY
pub fn parse_accuracy(line: &str) -> Option<f64> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let [accuracy] = words.as_slice() else {
        return None;
    };
    accuracy
        .parse::<f64>()
        .ok()
        .filter(|accuracy| *accuracy >= MIN_ACCURACY)
}

/// menu on stdin/stdout/stderr
pub fn run_repl() -> io::Result<()> {
    let stdin = io::stdin();
    let mut repl = QuadratureRepl::new(stdin.lock(), io::stdout(), io::stderr());
    repl.run()
}
