use crate::gui::run_postbox_application;

fn main() -> Result<(), ()> {
    env_logger::init();

    match run_postbox_application() {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("Error running application: {}", e);
            Err(())
        }
    }
}

mod gui;
