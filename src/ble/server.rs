//! GATT server and advertising loop.
//!
//! One connection at a time. While a central is connected the task runs the
//! GATT event loop and forwards queued payloads side by side; when the link
//! drops it goes back to advertising.

use colorsense::ble::adv_data;
use colorsense::config::{BLE_DEVICE_NAME, BLE_SERVICE_UUID_LE};
use colorsense::payload::PAYLOAD_CAPACITY;
use colorsense::{BleError, Error};
use defmt::{debug, info, warn};
use embassy_futures::select::{select, Either};
use embassy_time::Timer;
use heapless::Vec;
use nrf_softdevice::ble::{gatt_server, peripheral, Connection};
use nrf_softdevice::Softdevice;

use super::{LinkState, Outbox};

/// Color reading service. UUIDs match `config::BLE_SERVICE_UUID` and
/// `config::BLE_CHARACTERISTIC_UUID`.
#[nrf_softdevice::gatt_service(uuid = "4fafc201-1fb5-459e-8fcc-c5c9c331914b")]
pub struct ColorService {
    #[characteristic(
        uuid = "beb5483e-36e1-4688-b7f5-ea07361b26a8",
        read,
        write,
        notify,
        indicate
    )]
    reading: Vec<u8, 32>,
}

#[nrf_softdevice::gatt_server]
pub struct Server {
    color: ColorService,
}

impl Server {
    /// Register the GATT table. Call once, before advertising.
    pub fn register(sd: &mut Softdevice) -> Result<Self, Error> {
        Server::new(sd).map_err(|_| Error::from(BleError::RegisterFailed))
    }
}

#[embassy_executor::task]
pub async fn ble_task(
    sd: &'static Softdevice,
    server: &'static Server,
    outbox: &'static Outbox,
    link: &'static LinkState,
) -> ! {
    let adv = adv_data::advertising_data(&BLE_SERVICE_UUID_LE);
    let scan = adv_data::scan_response(BLE_DEVICE_NAME);
    let config = peripheral::Config::default();

    info!("BLE advertising as \"{}\"", BLE_DEVICE_NAME);

    loop {
        let advertisement = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &adv,
            scan_data: &scan,
        };
        let conn = match peripheral::advertise_connectable(sd, advertisement, &config).await {
            Ok(conn) => conn,
            Err(_) => {
                warn!("{}", Error::from(BleError::AdvertiseFailed));
                Timer::after_secs(1).await;
                continue;
            }
        };

        info!("BLE client connected");
        link.on_connected();

        let gatt = gatt_server::run(&conn, server, |event| match event {
            ServerEvent::Color(ColorServiceEvent::ReadingWrite(value)) => {
                debug!("client wrote {} bytes", value.len());
            }
            ServerEvent::Color(ColorServiceEvent::ReadingCccdWrite {
                indications,
                notifications,
            }) => {
                info!(
                    "subscription: notifications={} indications={}",
                    notifications, indications
                );
                link.set_subscribed(notifications || indications);
            }
        });

        match select(gatt, forward_payloads(&conn, server, outbox)).await {
            Either::First(_) => info!("BLE client disconnected"),
            Either::Second(()) => {}
        }

        link.on_disconnected();
        // Anything still queued belonged to the old link.
        outbox.clear();
    }
}

/// Push each queued payload into the characteristic and notify the peer.
async fn forward_payloads(conn: &Connection, server: &Server, outbox: &Outbox) {
    loop {
        let payload = outbox.receive().await;
        let Ok(value) = Vec::<u8, PAYLOAD_CAPACITY>::from_slice(payload.as_bytes()) else {
            continue;
        };

        if server.color.reading_set(&value).is_err() {
            warn!("could not update reading value");
        }
        match server.color.reading_notify(conn, &value) {
            Ok(()) => info!("BLE sent: {}", payload.as_str()),
            Err(_) => warn!("{}", Error::from(BleError::NotifyFailed)),
        }
    }
}
