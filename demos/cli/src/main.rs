use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use futures::executor::block_on;
use hospital_core::{CardRegistry, DirectoryConfig, DuplicateNames, HospitalDirectory};
use hospital_data::{load_directory, FsSource};

#[derive(Parser, Debug)]
#[command(
    name = "hospital-cli",
    about = "Ghép danh sách bệnh viện, giường trống và lịch hẹn từ các file JSON."
)]
struct Args {
    /// Thư mục chứa các file JSON.
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    #[arg(long, default_value = "data.json")]
    facilities: String,

    #[arg(long, default_value = "beds.json")]
    beds: String,

    #[arg(long, default_value = "appointment.json")]
    appointments: String,

    /// Báo lỗi thay vì ghi đè khi tên bệnh viện bị trùng.
    #[arg(long)]
    reject_duplicates: bool,

    /// Đưa thẻ của bệnh viện này lên đầu trước khi in.
    #[arg(long)]
    focus: Option<String>,

    /// In toàn bộ directory dạng JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = DirectoryConfig {
        facilities_url: args.facilities.clone(),
        beds_url: args.beds.clone(),
        appointments_url: args.appointments.clone(),
        duplicate_names: if args.reject_duplicates {
            DuplicateNames::Reject
        } else {
            DuplicateNames::LastWriteWins
        },
        ..DirectoryConfig::default()
    };

    let source = FsSource::new(&args.data_dir);
    let directory = block_on(load_directory(&source, &config))
        .with_context(|| format!("Không tải được dữ liệu từ {:?}", args.data_dir))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&directory)?);
        return Ok(());
    }

    let mut registry = CardRegistry::from_directory(&directory);
    if let Some(name) = &args.focus {
        if registry.bring_to_front(name).is_none() {
            log::warn!("không có thẻ cho `{name}`");
        }
    }

    print_cards(&directory, &registry);
    Ok(())
}

fn print_cards(directory: &HospitalDirectory, registry: &CardRegistry) {
    println!(
        "Generated at: {}\nHospitals: {}\nRosters: {}",
        directory.generated_at,
        directory.hospitals.len(),
        directory.appointments.len()
    );

    for card in registry.order().iter().filter_map(|id| directory.card(*id)) {
        println!("\n{}", card.facility.name);
        for line in &card.bed_lines {
            println!("  {}", line.text());
        }
        match card.appointments.placeholder() {
            Some(placeholder) => println!("  {placeholder}"),
            None => {
                for row in card.appointments.doctors() {
                    println!("  * {}", row.label());
                }
            }
        }
    }
}
