//! Prints the style runs and structural marks for a small LaTeX sample.
//!
//! Run with: cargo run --example highlight

use texmark::tokenize_source;

const SAMPLE: &str = "\
\\title{A Small Document}
\\maketitle
\\section{Results}
We found $x^2 + 1024$ cases, see \\ref{tab:all}.
\\begin{enumerate}
\\item the first case
\\item the second case
\\end{enumerate}
";

fn main() {
    let tokens = tokenize_source(SAMPLE).expect("tokenization cannot fail on this sample");

    for (number, (line, spans)) in SAMPLE.lines().zip(&tokens.lines).enumerate() {
        println!("{:>3} | {}", number, line);
        for span in spans {
            if let Some(class) = span.style.as_str() {
                let text: String = line
                    .chars()
                    .skip(span.from)
                    .take(span.to - span.from)
                    .collect();
                println!("    | {:>3}..{:<3} {:<8} {:?}", span.from, span.to, class, text);
            }
        }
    }

    println!();
    println!("marks:");
    for mark in &tokens.marks {
        print!(
            "  {:<16} ({},{})..({},{})",
            mark.kind.as_str(),
            mark.from.line,
            mark.from.column,
            mark.to.line,
            mark.to.column
        );
        if let Some(number) = mark.checked.number {
            print!("  #{}", number);
        }
        println!();
    }
}
