use crate::cli::{Commands, MerchantsCommand, PaymentsCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Payments {
            command: Some(PaymentsCommand::Show { json, .. }),
            ..
        }
        | Commands::Merchants {
            command: Some(MerchantsCommand::Show { json, .. }),
            ..
        }
        | Commands::Dashboard { json, .. } => *json,
        Commands::Payments {
            command: None,
            args,
        } => args.paging.json,
        Commands::Merchants {
            command: None,
            args,
        } => args.paging.json,
        Commands::Transactions { args } => args.paging.json,
    };

    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}

#[cfg(test)]
mod tests {
    use super::{OutputMode, mode_for_command};
    use crate::cli::parse_from;

    #[test]
    fn json_flag_selects_json_for_every_command() {
        let cases: [&[&str]; 6] = [
            &["paydesk", "payments", "--json"],
            &["paydesk", "payments", "show", "PAY-001", "--json"],
            &["paydesk", "transactions", "--json"],
            &["paydesk", "merchants", "--json"],
            &["paydesk", "merchants", "show", "MCHT-001", "--json"],
            &["paydesk", "dashboard", "--json"],
        ];

        for args in cases {
            let parsed = parse_from(args);
            assert!(parsed.is_ok(), "failed to parse: {args:?}");
            if let Ok(cli) = parsed {
                assert_eq!(mode_for_command(&cli.command), OutputMode::Json);
            }
        }
    }

    #[test]
    fn text_is_the_default() {
        let parsed = parse_from(["paydesk", "merchants", "show", "MCHT-001"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(mode_for_command(&cli.command), OutputMode::Text);
        }

        let listing = parse_from(["paydesk", "payments", "--page", "2"]);
        assert!(listing.is_ok());
        if let Ok(cli) = listing {
            assert_eq!(mode_for_command(&cli.command), OutputMode::Text);
        }
    }
}
