use fruit_tracker_common::games::match3::Match3Command;

/// Parses one line typed by the player.
pub fn parse_command(line: &str) -> Result<Match3Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();

    match words.as_slice() {
        ["start" | "s"] => Ok(Match3Command::Start),
        ["ok" | "ack"] => Ok(Match3Command::Acknowledge),
        ["retry" | "r"] => Ok(Match3Command::Retry),
        ["leave" | "l"] => Ok(Match3Command::Leave),
        ["quit" | "q" | "exit"] => Ok(Match3Command::Quit),
        [row, col] => {
            let row = row
                .parse::<usize>()
                .map_err(|_| format!("Invalid row: {}", row))?;
            let col = col
                .parse::<usize>()
                .map_err(|_| format!("Invalid column: {}", col))?;
            Ok(Match3Command::Select { row, col })
        }
        [] => Err("Empty command".to_string()),
        _ => Err(format!("Unknown command: {}", line.trim())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse_command("start"), Ok(Match3Command::Start));
        assert_eq!(parse_command("  ok \n"), Ok(Match3Command::Acknowledge));
        assert_eq!(parse_command("retry"), Ok(Match3Command::Retry));
        assert_eq!(parse_command("l"), Ok(Match3Command::Leave));
        assert_eq!(parse_command("q"), Ok(Match3Command::Quit));
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(
            parse_command("2 5"),
            Ok(Match3Command::Select { row: 2, col: 5 })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("").is_err());
        assert!(parse_command("2 x").is_err());
        assert!(parse_command("-1 3").is_err());
        assert!(parse_command("swap 1 2").is_err());
    }
}
