use iced::{widget::{button, column, container, text}, Alignment, Application, Element, Length, Pixels, Program, Size, Task, Theme};

use postbox_core::{app_config, fetch_message, FetchOutcome};

const SINGLE_PAD : Pixels = Pixels(5.0);
const DOUBLE_PAD : Pixels = Pixels(10.0);
const WAITING_TEXT : &str = "Waiting for data...";

pub fn run_postbox_application() -> iced::Result {
    postbox_application(app_config::data_endpoint()).run()
}

fn postbox_application(endpoint: String) -> Application<impl Program<State = DataPage, Message = DataPageMessage, Theme = Theme>> {
    iced::application(move || DataPage::with_endpoint(endpoint.clone()), DataPage::update, DataPage::view)
        .title("Postbox")
        .window_size(Size::new(420.0, 240.0))
        .theme(|_state: &DataPage| theme())
}

fn theme() -> Theme {
    Theme::Light
}

#[derive(Clone, Debug)]
pub struct DataPage {
    endpoint: String,
    label_text: String,
}

#[derive(Clone, Debug)]
pub enum DataPageMessage {
    FetchRequested,
}

impl DataPage {
    fn with_endpoint(endpoint: String) -> Self {
        DataPage {
            endpoint,
            label_text: WAITING_TEXT.to_string(),
        }
    }

    pub fn update(&mut self, message: DataPageMessage) -> Task<DataPageMessage> {
        match message {
            DataPageMessage::FetchRequested => {
                println!("Fetch requested from {}", self.endpoint);

                // The request blocks the event loop until it returns; clicks
                // made in the meantime are dispatched afterwards.
                match fetch_message(&self.endpoint) {
                    Ok(FetchOutcome::Received(message)) => {
                        self.label_text = format!("Received from Flask: {}", message);
                    },
                    Ok(FetchOutcome::Skipped { status }) => {
                        println!("Endpoint answered {}, leaving label unchanged", status);
                    },
                    Err(e) => {
                        eprintln!("Error fetching data: {}", e);
                        self.label_text = format!("Error fetching data: {}", e);
                    },
                }

                Task::none()
            },
        }
    }

    pub fn view(&self) -> Element<'_, DataPageMessage> {
        let data_label = text(self.label_text.as_str()).size(16);

        let fetch_button = button("Fetch Data from Flask")
            .on_press(DataPageMessage::FetchRequested)
            .padding(SINGLE_PAD);

        let content = column![data_label, fetch_button]
            .spacing(DOUBLE_PAD)
            .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }
}
