use clap::{Arg, Command};

pub const CMD_PRODUCTS: &str = "products";
pub const ARG_ID: &str = "id";
pub const ARG_NAME: &str = "name";
pub const ARG_DESCRIPTION: &str = "description";
pub const ARG_PRICE: &str = "price";

fn id_arg() -> Arg {
    Arg::new(ARG_ID)
        .help("Product id")
        .required(true)
        .value_parser(clap::value_parser!(i64))
}

fn with_body_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_NAME)
                .long(ARG_NAME)
                .help("Product name")
                .required(true),
        )
        .arg(
            Arg::new(ARG_DESCRIPTION)
                .long(ARG_DESCRIPTION)
                .help("Product description")
                .default_value(""),
        )
        .arg(
            Arg::new(ARG_PRICE)
                .long(ARG_PRICE)
                .help("Product price")
                .required(true)
                .value_parser(clap::value_parser!(f64)),
        )
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new(CMD_PRODUCTS)
        .about("Work with the product catalog")
        .subcommand_required(true)
        .subcommand(Command::new("list").about("List products"))
        .subcommand(
            Command::new("get")
                .about("Show one product")
                .arg(id_arg()),
        )
        .subcommand(with_body_args(
            Command::new("create").about("Create a product (supervisor or admin)"),
        ))
        .subcommand(with_body_args(
            Command::new("update")
                .about("Replace a product (supervisor or admin)")
                .arg(id_arg()),
        ))
        .subcommand(
            Command::new("delete")
                .about("Delete a product (admin)")
                .arg(id_arg()),
        )
}
