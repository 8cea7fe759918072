fn util() {
    // BUG (mristin, 2020-07-20): Off by one.
}
