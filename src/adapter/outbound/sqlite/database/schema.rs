// Mirrors the table created by the trading bot. This crate never migrates it.

diesel::table! {
    trade_history (id) {
        id -> Integer,
        alt_coin_id -> Nullable<Text>,
        crypto_coin_id -> Nullable<Text>,
        selling -> Nullable<Bool>,
        state -> Nullable<Text>,
        alt_starting_balance -> Nullable<Double>,
        alt_trade_amount -> Nullable<Double>,
        crypto_starting_balance -> Nullable<Double>,
        crypto_trade_amount -> Nullable<Double>,
        datetime -> Nullable<Text>,
    }
}
